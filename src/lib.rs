//! spentcal - Calories burned during walking and running
//!
//! spentcal turns a compact training record (`<steps>,<activity>,<duration>`)
//! and a person's weight and height into a short text report through a
//! deterministic pipeline: record parsing → distance/speed model → calorie
//! estimation for the activity → report rendering.
//!
//! The library API below is the primary interface. The `spentcal` binary,
//! built only with the `cli` feature, is an optional wrapper over
//! [`TrainingCalculator`] and [`spent_calories`], and the [`ffi`] module exposes
//! the same operations over a C ABI.
//!
//! ```
//! let report = spentcal::training_info("5000,Бег,1h", 70.0, 1.75).unwrap();
//! assert!(report.contains("Дистанция: 3.94 км."));
//! ```

pub mod calories;
pub mod duration;
pub mod error;
pub mod metrics;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use calories::{running_spent_calories, spent_calories, walking_spent_calories};
pub use error::{CalorieError, ErrorKind};
pub use pipeline::{training_info, TrainingCalculator};
pub use types::{ActivityKind, Biometrics, DerivedMetrics, TrainingRecord, TrainingSummary};

/// spentcal version
pub const SPENTCAL_VERSION: &str = env!("CARGO_PKG_VERSION");
