//! Duration expressions
//!
//! Training durations are written as a signed sequence of decimal numbers, each
//! with a unit suffix: `1h30m`, `45m`, `1.5h`, `-2m3.5s`, `300ms`. Valid units are
//! `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m` and `h`.

use chrono::Duration;
use thiserror::Error;

const NANOS_PER_MINUTE: i64 = 60 * 1_000_000_000;
const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;

/// Largest magnitude a duration may have, in nanoseconds (`2^63`)
const MAX_MAGNITUDE: u64 = 1 << 63;

/// Errors produced while parsing a duration expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,

    #[error("invalid duration {0:?}")]
    InvalidSyntax(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {0:?} out of range")]
    Overflow(String),
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(NANOS_PER_MINUTE as u64),
        "h" => Some(NANOS_PER_HOUR as u64),
        _ => None,
    }
}

/// Consume leading ASCII digits as an integer. `None` on overflow.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    for b in s[..end].bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .filter(|v| *v <= MAX_MAGNITUDE)?;
    }
    Some((value, &s[end..]))
}

/// Consume leading ASCII digits as a fraction `value / scale`.
/// Digits past the representable precision are dropped.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut saturated = false;
    for b in s[..end].bytes() {
        if saturated {
            continue;
        }
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .filter(|v| *v <= MAX_MAGNITUDE)
        {
            Some(next) => {
                value = next;
                scale *= 10.0;
            }
            None => saturated = true,
        }
    }
    (value, scale, &s[end..])
}

/// Parse a duration expression such as `1h30m` or `45m`.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let invalid = || DurationError::InvalidSyntax(input.to_string());
    let overflow = || DurationError::Overflow(input.to_string());

    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(Duration::zero());
    }
    if s.is_empty() {
        return Err(if input.is_empty() {
            DurationError::Empty
        } else {
            invalid()
        });
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        if !s.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let before = s.len();
        let (whole, rest) = leading_int(s).ok_or_else(invalid)?;
        s = rest;
        let has_whole = before != s.len();

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut has_fraction = false;
        if let Some(rest) = s.strip_prefix('.') {
            let before = rest.len();
            let (f, sc, rest) = leading_fraction(rest);
            fraction = f;
            scale = sc;
            s = rest;
            has_fraction = before != s.len();
        }
        if !has_whole && !has_fraction {
            return Err(invalid());
        }

        let unit_end = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_end == 0 {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let unit_str = &s[..unit_end];
        s = &s[unit_end..];
        let unit = unit_nanos(unit_str).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit_str.to_string(),
            input: input.to_string(),
        })?;

        let mut term = whole
            .checked_mul(unit)
            .filter(|v| *v <= MAX_MAGNITUDE)
            .ok_or_else(overflow)?;
        if fraction > 0 {
            // Truncation toward zero matches integer nanosecond resolution
            term = term
                .checked_add((fraction as f64 * (unit as f64 / scale)) as u64)
                .filter(|v| *v <= MAX_MAGNITUDE)
                .ok_or_else(overflow)?;
        }
        total = total
            .checked_add(term)
            .filter(|v| *v <= MAX_MAGNITUDE)
            .ok_or_else(overflow)?;
    }

    let nanos = if negative {
        if total == MAX_MAGNITUDE {
            i64::MIN
        } else {
            -(total as i64)
        }
    } else {
        i64::try_from(total).map_err(|_| overflow())?
    };
    Ok(Duration::nanoseconds(nanos))
}

/// Split a duration into whole units of `unit_nanos` plus a fractional remainder.
fn fractional_units(duration: Duration, unit_nanos: i64) -> f64 {
    match duration.num_nanoseconds() {
        Some(nanos) => {
            let whole = nanos / unit_nanos;
            let rem = nanos % unit_nanos;
            whole as f64 + rem as f64 / unit_nanos as f64
        }
        // Beyond ~292 years nanosecond precision is meaningless
        None => duration.num_milliseconds() as f64 / (unit_nanos / 1_000_000) as f64,
    }
}

/// Duration as a fractional number of hours
pub fn hours(duration: Duration) -> f64 {
    fractional_units(duration, NANOS_PER_HOUR)
}

/// Duration as a fractional number of minutes
pub fn minutes(duration: Duration) -> f64 {
    fractional_units(duration, NANOS_PER_MINUTE)
}
