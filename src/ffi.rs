//! FFI bindings for spentcal
//!
//! This module provides C-compatible functions for calling spentcal from other
//! languages. All functions use C strings (null-terminated) and return allocated
//! memory that must be freed by the caller using `spentcal_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_double, c_int, c_longlong};
use std::ptr;

use chrono::Duration;

use crate::calories::{running_spent_calories, walking_spent_calories};
use crate::error::CalorieError;
use crate::pipeline::TrainingCalculator;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Shared body of the record-based entry points
unsafe fn with_record(
    data: *const c_char,
    weight: c_double,
    height: c_double,
    run: impl FnOnce(&TrainingCalculator, &str) -> Result<String, CalorieError>,
) -> *mut c_char {
    clear_last_error();

    let record = match cstr_to_string(data) {
        Some(s) => s,
        None => {
            set_last_error("Invalid record string pointer");
            return ptr::null_mut();
        }
    };

    let calculator = TrainingCalculator::new(weight, height);
    match run(&calculator, &record) {
        Ok(out) => string_to_cstr(&out),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Record API
// ============================================================================

/// Compute the text report for a training record.
///
/// # Safety
/// - `data` must be a valid null-terminated UTF-8 C string.
/// - Returns a newly allocated string that must be freed with `spentcal_free_string`.
/// - Returns NULL on error; call `spentcal_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn spentcal_training_info(
    data: *const c_char,
    weight: c_double,
    height: c_double,
) -> *mut c_char {
    with_record(data, weight, height, |calculator, record| {
        calculator.info(record)
    })
}

/// Compute the training summary for a record and return it as JSON.
///
/// # Safety
/// - `data` must be a valid null-terminated UTF-8 C string.
/// - Returns a newly allocated string that must be freed with `spentcal_free_string`.
/// - Returns NULL on error; call `spentcal_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn spentcal_training_summary_json(
    data: *const c_char,
    weight: c_double,
    height: c_double,
) -> *mut c_char {
    with_record(data, weight, height, |calculator, record| {
        calculator.summary_json(record)
    })
}

// ============================================================================
// Estimators
// ============================================================================

unsafe fn write_calories(
    result: Result<f64, CalorieError>,
    out_calories: *mut c_double,
) -> c_int {
    if out_calories.is_null() {
        set_last_error("Invalid output pointer");
        return -1;
    }
    match result {
        Ok(calories) => {
            *out_calories = calories;
            0
        }
        Err(e) => {
            set_last_error(&e.to_string());
            -1
        }
    }
}

/// Calories burned while running, with the duration given in milliseconds.
///
/// # Safety
/// - `out_calories` must be a valid pointer to a writable double.
/// - Returns 0 on success, -1 on error; call `spentcal_last_error` for details.
#[no_mangle]
pub unsafe extern "C" fn spentcal_running_calories(
    steps: c_longlong,
    weight: c_double,
    height: c_double,
    duration_ms: c_longlong,
    out_calories: *mut c_double,
) -> c_int {
    clear_last_error();
    let Some(duration) = Duration::try_milliseconds(duration_ms) else {
        set_last_error("Invalid duration");
        return -1;
    };
    write_calories(
        running_spent_calories(steps, weight, height, duration),
        out_calories,
    )
}

/// Calories burned while walking, with the duration given in milliseconds.
///
/// # Safety
/// - `out_calories` must be a valid pointer to a writable double.
/// - Returns 0 on success, -1 on error; call `spentcal_last_error` for details.
#[no_mangle]
pub unsafe extern "C" fn spentcal_walking_calories(
    steps: c_longlong,
    weight: c_double,
    height: c_double,
    duration_ms: c_longlong,
    out_calories: *mut c_double,
) -> c_int {
    clear_last_error();
    let Some(duration) = Duration::try_milliseconds(duration_ms) else {
        set_last_error("Invalid duration");
        return -1;
    };
    write_calories(
        walking_spent_calories(steps, weight, height, duration),
        out_calories,
    )
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by spentcal functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a spentcal function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn spentcal_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next spentcal call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn spentcal_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the spentcal library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn spentcal_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
