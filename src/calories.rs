//! Calorie estimators
//!
//! Both formulas are `weight × speed × minutes / 60`; walking is calibrated at
//! half the running output. Inputs are checked for positivity here even when
//! they already went through the parser, since the estimators are public.

use chrono::Duration;

use crate::duration;
use crate::error::CalorieError;
use crate::metrics::mean_speed;
use crate::types::ActivityKind;

/// Minutes in an hour
pub const MIN_IN_H: f64 = 60.0;

/// Walking burns this share of the running formula's output
pub const WALKING_CALORIES_COEFFICIENT: f64 = 0.5;

fn check_parameters(
    steps: i64,
    weight: f64,
    height: f64,
    duration: Duration,
) -> Result<(), CalorieError> {
    let mut invalid = Vec::new();
    if steps <= 0 {
        invalid.push(format!("steps={steps}"));
    }
    if weight.is_nan() || weight <= 0.0 {
        invalid.push(format!("weight={weight}"));
    }
    if height.is_nan() || height <= 0.0 {
        invalid.push(format!("height={height}"));
    }
    if duration <= Duration::zero() {
        invalid.push(format!("duration={}ms", duration.num_milliseconds()));
    }

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(CalorieError::InvalidParameters(format!(
            "{} must be positive",
            invalid.join(", ")
        )))
    }
}

fn base_calories(steps: i64, weight: f64, height: f64, duration: Duration) -> f64 {
    let speed = mean_speed(steps, height, duration);
    weight * speed * duration::minutes(duration) / MIN_IN_H
}

/// Calories burned while running
pub fn running_spent_calories(
    steps: i64,
    weight: f64,
    height: f64,
    duration: Duration,
) -> Result<f64, CalorieError> {
    check_parameters(steps, weight, height, duration)?;
    Ok(base_calories(steps, weight, height, duration))
}

/// Calories burned while walking
pub fn walking_spent_calories(
    steps: i64,
    weight: f64,
    height: f64,
    duration: Duration,
) -> Result<f64, CalorieError> {
    check_parameters(steps, weight, height, duration)?;
    Ok(base_calories(steps, weight, height, duration) * WALKING_CALORIES_COEFFICIENT)
}

/// Calories burned for the given activity
pub fn spent_calories(
    kind: ActivityKind,
    steps: i64,
    weight: f64,
    height: f64,
    duration: Duration,
) -> Result<f64, CalorieError> {
    match kind {
        ActivityKind::Running => running_spent_calories(steps, weight, height, duration),
        ActivityKind::Walking => walking_spent_calories(steps, weight, height, duration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_running_calories() {
        let calories = running_spent_calories(5000, 70.0, 1.75, Duration::hours(1)).unwrap();
        assert_eq!(calories, 275.625);

        let calories = running_spent_calories(3000, 80.0, 1.8, Duration::minutes(30)).unwrap();
        assert!((calories - 194.4).abs() < 1e-9);
    }

    #[test]
    fn test_walking_is_half_of_running() {
        let cases = [
            (5000, 70.0, 1.75, Duration::hours(1)),
            (3000, 80.0, 1.8, Duration::minutes(30)),
            (12_345, 55.5, 1.62, Duration::seconds(5_432)),
            (1, 120.0, 2.05, Duration::milliseconds(1)),
        ];
        for (steps, weight, height, duration) in cases {
            let running = running_spent_calories(steps, weight, height, duration).unwrap();
            let walking = walking_spent_calories(steps, weight, height, duration).unwrap();
            assert_eq!(walking, running * 0.5);
        }
    }

    #[test]
    fn test_dispatch_by_kind() {
        let d = Duration::hours(1);
        assert_eq!(
            spent_calories(ActivityKind::Running, 5000, 70.0, 1.75, d).unwrap(),
            275.625
        );
        assert_eq!(
            spent_calories(ActivityKind::Walking, 5000, 70.0, 1.75, d).unwrap(),
            137.8125
        );
    }

    #[test]
    fn test_invalid_parameters() {
        let d = Duration::hours(1);
        let cases = [
            (0, 70.0, 1.75, d),
            (-1, 70.0, 1.75, d),
            (5000, 0.0, 1.75, d),
            (5000, -70.0, 1.75, d),
            (5000, f64::NAN, 1.75, d),
            (5000, 70.0, 0.0, d),
            (5000, 70.0, 1.75, Duration::zero()),
            (5000, 70.0, 1.75, Duration::minutes(-1)),
        ];
        for (steps, weight, height, duration) in cases {
            for kind in ActivityKind::ALL {
                let err = spent_calories(kind, steps, weight, height, duration).unwrap_err();
                assert_eq!(err.kind(), Some(ErrorKind::InvalidParameters));
            }
        }
    }

    #[test]
    fn test_invalid_parameters_message_lists_every_field() {
        let err = running_spent_calories(0, -1.0, 1.75, Duration::zero()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("steps=0"));
        assert!(message.contains("weight=-1"));
        assert!(message.contains("duration=0ms"));
        assert!(!message.contains("height"));
    }
}
