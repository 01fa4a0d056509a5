//! Core types for the spentcal pipeline
//!
//! These are the values that flow between stages: the parsed training record,
//! caller biometrics, the derived metrics and the final summary.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::CalorieError;

/// Activity classification selecting the calorie formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Running,
    Walking,
}

impl ActivityKind {
    /// All recognized activities
    pub const ALL: [ActivityKind; 2] = [ActivityKind::Running, ActivityKind::Walking];

    /// Label used for this activity in training records and reports
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Running => "Бег",
            ActivityKind::Walking => "Ходьба",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Running => "running",
            ActivityKind::Walking => "walking",
        }
    }

    /// Resolve a record label to an activity
    pub fn from_label(label: &str) -> Result<Self, CalorieError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == label)
            .ok_or_else(|| CalorieError::UnknownActivity(label.to_string()))
    }
}

/// A parsed training record: `<steps>,<activity>,<duration>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingRecord {
    /// Number of steps taken (always positive)
    pub steps: i64,
    /// Activity label, trimmed; not yet resolved to an [`ActivityKind`]
    pub activity: String,
    /// Training duration (always positive)
    pub duration: Duration,
}

/// Caller-supplied body measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Biometrics {
    /// Body weight (kilograms)
    pub weight_kg: f64,
    /// Body height (meters)
    pub height_m: f64,
}

impl Biometrics {
    pub fn new(weight_kg: f64, height_m: f64) -> Self {
        Self {
            weight_kg,
            height_m,
        }
    }
}

/// Metrics derived from a training record and biometrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Distance covered (kilometers)
    pub distance_km: f64,
    /// Mean speed over the whole training (km/h)
    pub mean_speed_kmh: f64,
    /// Calories burned (kcal)
    pub calories: f64,
}

/// Everything the report is rendered from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Activity label as it appeared in the record
    pub activity: String,
    /// Resolved activity
    pub kind: ActivityKind,
    /// Number of steps
    pub steps: i64,
    /// Duration (fractional hours)
    pub duration_hours: f64,
    /// Biometrics used for the computation
    pub biometrics: Biometrics,
    /// Derived distance, speed and calories
    pub metrics: DerivedMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_activity_labels_resolve() {
        assert_eq!(
            ActivityKind::from_label("Бег").unwrap(),
            ActivityKind::Running
        );
        assert_eq!(
            ActivityKind::from_label("Ходьба").unwrap(),
            ActivityKind::Walking
        );
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = ActivityKind::from_label("Плавание").unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::UnknownActivity));

        // Labels are matched exactly
        assert!(ActivityKind::from_label("бег").is_err());
        assert!(ActivityKind::from_label("running").is_err());
    }

    #[test]
    fn test_activity_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ActivityKind::Walking).unwrap();
        assert_eq!(json, "\"walking\"");
        let kind: ActivityKind = serde_json::from_str("\"running\"").unwrap();
        assert_eq!(kind, ActivityKind::Running);
    }
}
