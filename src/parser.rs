//! Training record parser
//!
//! Splits a raw `<steps>,<activity>,<duration>` record into a [`TrainingRecord`],
//! checking each field's syntax and range.

use chrono::Duration;
use tracing::debug;

use crate::duration::parse_duration;
use crate::error::{CalorieError, Field};
use crate::types::TrainingRecord;

/// Parse a raw training record.
///
/// # Example
/// ```
/// let record = spentcal::parser::parse_training("5000,Бег,1h30m").unwrap();
/// assert_eq!(record.steps, 5000);
/// assert_eq!(record.activity, "Бег");
/// ```
pub fn parse_training(data: &str) -> Result<TrainingRecord, CalorieError> {
    let parts: Vec<&str> = data.split(',').collect();
    let [steps, activity, duration] = parts[..] else {
        return Err(CalorieError::Format(parts.len()));
    };

    let steps = parse_steps(steps)?;
    let activity = parse_activity(activity)?;
    let duration = parse_training_duration(duration)?;

    debug!(
        steps,
        activity = %activity,
        duration_ms = duration.num_milliseconds(),
        "parsed training record"
    );

    Ok(TrainingRecord {
        steps,
        activity,
        duration,
    })
}

fn parse_steps(field: &str) -> Result<i64, CalorieError> {
    let steps = field.parse::<i64>().map_err(|e| CalorieError::Parse {
        field: Field::Steps,
        source: e.into(),
    })?;
    if steps <= 0 {
        return Err(CalorieError::Validation {
            field: Field::Steps,
            reason: "must be a positive number",
        });
    }
    Ok(steps)
}

fn parse_activity(field: &str) -> Result<String, CalorieError> {
    let activity = field.trim();
    if activity.is_empty() {
        return Err(CalorieError::Validation {
            field: Field::Activity,
            reason: "activity is not specified",
        });
    }
    Ok(activity.to_string())
}

fn parse_training_duration(field: &str) -> Result<Duration, CalorieError> {
    let duration = parse_duration(field).map_err(|e| CalorieError::Parse {
        field: Field::Duration,
        source: e.into(),
    })?;
    if duration <= Duration::zero() {
        return Err(CalorieError::Validation {
            field: Field::Duration,
            reason: "must be positive",
        });
    }
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kind_and_field(data: &str) -> (Option<ErrorKind>, Option<Field>) {
        let err = parse_training(data).unwrap_err();
        (err.kind(), err.field())
    }

    #[test]
    fn test_parse_valid_records() {
        let record = parse_training("5000,Бег,1h").unwrap();
        assert_eq!(
            record,
            TrainingRecord {
                steps: 5000,
                activity: "Бег".to_string(),
                duration: Duration::hours(1),
            }
        );

        let record = parse_training("12345,Ходьба,1h30m").unwrap();
        assert_eq!(record.steps, 12345);
        assert_eq!(record.activity, "Ходьба");
        assert_eq!(record.duration, Duration::minutes(90));
    }

    #[test]
    fn test_activity_is_trimmed_but_not_resolved() {
        let record = parse_training("100,  Ходьба \t,45m").unwrap();
        assert_eq!(record.activity, "Ходьба");

        // Unknown labels pass parsing; they are rejected at dispatch
        let record = parse_training("100,Плавание,45m").unwrap();
        assert_eq!(record.activity, "Плавание");
    }

    #[test]
    fn test_wrong_field_count() {
        assert!(matches!(
            parse_training("5000,Бег").unwrap_err(),
            CalorieError::Format(2)
        ));
        assert!(matches!(
            parse_training("5000,Бег,1h,extra").unwrap_err(),
            CalorieError::Format(4)
        ));
        assert!(matches!(
            parse_training("").unwrap_err(),
            CalorieError::Format(1)
        ));
    }

    #[test]
    fn test_invalid_steps() {
        assert_eq!(
            kind_and_field("abc,Бег,1h"),
            (Some(ErrorKind::Parse), Some(Field::Steps))
        );
        assert_eq!(
            kind_and_field(" 5000,Бег,1h"),
            (Some(ErrorKind::Parse), Some(Field::Steps))
        );
        assert_eq!(
            kind_and_field("99999999999999999999,Бег,1h"),
            (Some(ErrorKind::Parse), Some(Field::Steps))
        );
        assert_eq!(
            kind_and_field("0,Бег,1h"),
            (Some(ErrorKind::Validation), Some(Field::Steps))
        );
        assert_eq!(
            kind_and_field("-10,Бег,1h"),
            (Some(ErrorKind::Validation), Some(Field::Steps))
        );
    }

    #[test]
    fn test_empty_activity() {
        assert_eq!(
            kind_and_field("5000,   ,1h"),
            (Some(ErrorKind::Validation), Some(Field::Activity))
        );
    }

    #[test]
    fn test_invalid_duration() {
        assert_eq!(
            kind_and_field("5000,Бег,one hour"),
            (Some(ErrorKind::Parse), Some(Field::Duration))
        );
        assert_eq!(
            kind_and_field("5000,Бег, 1h"),
            (Some(ErrorKind::Parse), Some(Field::Duration))
        );
        assert_eq!(
            kind_and_field("5000,Бег,0s"),
            (Some(ErrorKind::Validation), Some(Field::Duration))
        );
        assert_eq!(
            kind_and_field("5000,Бег,-30m"),
            (Some(ErrorKind::Validation), Some(Field::Duration))
        );
    }

    #[test]
    fn test_fields_are_checked_in_order() {
        // Steps are rejected before a bad duration is looked at
        assert_eq!(
            kind_and_field("0,Бег,nope"),
            (Some(ErrorKind::Validation), Some(Field::Steps))
        );
    }
}
