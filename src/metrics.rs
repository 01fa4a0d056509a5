//! Distance and speed model
//!
//! Stride length is modeled as a fixed share of body height; distance is
//! steps times stride, and mean speed is distance over elapsed time.

use chrono::Duration;

use crate::duration;

/// Stride length as a share of body height
pub const STEP_LENGTH_COEFFICIENT: f64 = 0.45;

/// Meters in a kilometer
pub const M_IN_KM: f64 = 1000.0;

/// Distance covered in kilometers, given height in meters
pub fn distance(steps: i64, height: f64) -> f64 {
    let step_length = height * STEP_LENGTH_COEFFICIENT;
    steps as f64 * step_length / M_IN_KM
}

/// Mean speed in km/h.
///
/// Returns 0 for a zero or negative duration instead of dividing by it.
pub fn mean_speed(steps: i64, height: f64, duration: Duration) -> f64 {
    if duration <= Duration::zero() {
        return 0.0;
    }
    distance(steps, height) / duration::hours(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_from_stride() {
        assert_eq!(distance(5000, 1.75), 3.9375);
        assert_eq!(distance(0, 1.75), 0.0);
        assert!((distance(1000, 2.0) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_distance_is_linear_and_monotonic() {
        let height = 1.68;
        let mut previous = 0.0;
        for steps in [1, 10, 999, 5000, 12_345, 100_000] {
            let d = distance(steps, height);
            assert!(d >= previous);
            assert_eq!(distance(2 * steps, height), 2.0 * d);
            previous = d;
        }
    }

    #[test]
    fn test_mean_speed() {
        assert_eq!(mean_speed(5000, 1.75, Duration::hours(1)), 3.9375);
        assert_eq!(mean_speed(3000, 1.8, Duration::minutes(30)), 4.86);
    }

    #[test]
    fn test_mean_speed_guards_non_positive_duration() {
        assert_eq!(mean_speed(5000, 1.75, Duration::zero()), 0.0);
        assert_eq!(mean_speed(5000, 1.75, Duration::minutes(-5)), 0.0);
        assert_eq!(mean_speed(-5000, -1.0, Duration::zero()), 0.0);
    }
}
