//! Pipeline orchestration
//!
//! This module provides the public API for spentcal. It runs a raw record
//! through parsing, the distance/speed model and the calorie estimator matching
//! its activity, then renders the summary.

use tracing::debug;

use crate::calories::spent_calories;
use crate::duration;
use crate::error::{CalorieError, Stage};
use crate::metrics::{distance, mean_speed};
use crate::parser::parse_training;
use crate::report;
use crate::types::{ActivityKind, Biometrics, DerivedMetrics, TrainingSummary};

/// Compute the text report for a raw training record.
///
/// # Arguments
/// * `data` - Record in the form `<steps>,<activity>,<duration>`
/// * `weight` - Body weight in kilograms
/// * `height` - Body height in meters
///
/// # Example
/// ```
/// let report = spentcal::training_info("5000,Ходьба,1h", 70.0, 1.75).unwrap();
/// assert!(report.ends_with("Сожгли калорий: 137.81\n"));
/// ```
pub fn training_info(data: &str, weight: f64, height: f64) -> Result<String, CalorieError> {
    TrainingCalculator::new(weight, height).info(data)
}

/// Calculator bound to one person's biometrics.
///
/// Use this when several records are evaluated for the same person.
#[derive(Debug, Clone, Copy)]
pub struct TrainingCalculator {
    biometrics: Biometrics,
}

impl TrainingCalculator {
    /// Create a calculator for the given weight (kg) and height (m)
    pub fn new(weight: f64, height: f64) -> Self {
        Self::with_biometrics(Biometrics::new(weight, height))
    }

    pub fn with_biometrics(biometrics: Biometrics) -> Self {
        Self { biometrics }
    }

    pub fn biometrics(&self) -> Biometrics {
        self.biometrics
    }

    /// Run the full pipeline and return the structured summary.
    ///
    /// Pipeline stages:
    /// 1. Parser - split and validate the record
    /// 2. Distance/speed model
    /// 3. Activity dispatch
    /// 4. Calorie estimator for the activity
    pub fn summarize(&self, data: &str) -> Result<TrainingSummary, CalorieError> {
        let Biometrics {
            weight_kg,
            height_m,
        } = self.biometrics;

        // Stage 1: Parse
        let record = parse_training(data).map_err(|e| e.in_stage(Stage::Parsing))?;

        // Stage 2: Distance and speed
        let distance_km = distance(record.steps, height_m);
        let mean_speed_kmh = mean_speed(record.steps, height_m, record.duration);
        debug!(distance_km, mean_speed_kmh, "derived distance and speed");

        // Stage 3: Resolve activity
        let kind = ActivityKind::from_label(&record.activity)?;

        // Stage 4: Calories
        let calories = spent_calories(kind, record.steps, weight_kg, height_m, record.duration)
            .map_err(|e| e.in_stage(Stage::CalorieEstimation))?;
        debug!(activity = kind.as_str(), calories, "estimated calories");

        Ok(TrainingSummary {
            activity: record.activity,
            kind,
            steps: record.steps,
            duration_hours: duration::hours(record.duration),
            biometrics: self.biometrics,
            metrics: DerivedMetrics {
                distance_km,
                mean_speed_kmh,
                calories,
            },
        })
    }

    /// Run the full pipeline and render the text report
    pub fn info(&self, data: &str) -> Result<String, CalorieError> {
        self.summarize(data).map(|summary| report::render(&summary))
    }

    /// Run the full pipeline and encode the summary as pretty JSON
    pub fn summary_json(&self, data: &str) -> Result<String, CalorieError> {
        let summary = self.summarize(data)?;
        Ok(serde_json::to_string_pretty(&summary)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Field};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_running_report() {
        let report = training_info("5000,Бег,1h", 70.0, 1.75).unwrap();
        assert_eq!(
            report,
            "Тип тренировки: Бег\n\
             Длительность: 1.00 ч.\n\
             Дистанция: 3.94 км.\n\
             Скорость: 3.94 км/ч\n\
             Сожгли калорий: 275.62\n"
        );
    }

    #[test]
    fn test_walking_report() {
        let report = training_info("5000,Ходьба,1h", 70.0, 1.75).unwrap();
        assert_eq!(
            report,
            "Тип тренировки: Ходьба\n\
             Длительность: 1.00 ч.\n\
             Дистанция: 3.94 км.\n\
             Скорость: 3.94 км/ч\n\
             Сожгли калорий: 137.81\n"
        );
    }

    #[test]
    fn test_half_hour_walk() {
        let report = training_info("3000,Ходьба,30m", 80.0, 1.8).unwrap();
        assert_eq!(
            report,
            "Тип тренировки: Ходьба\n\
             Длительность: 0.50 ч.\n\
             Дистанция: 2.43 км.\n\
             Скорость: 4.86 км/ч\n\
             Сожгли калорий: 97.20\n"
        );
    }

    #[test]
    fn test_report_numbers_round_trip() {
        let calculator = TrainingCalculator::new(63.4, 1.69);
        let summary = calculator.summarize("8765,Бег,1h7m12s").unwrap();
        let report = report::render(&summary);

        let numbers: Vec<f64> = report
            .lines()
            .skip(1)
            .map(|line| {
                let value = line.split(": ").nth(1).unwrap();
                let value = value.split(' ').next().unwrap();
                value.parse().unwrap()
            })
            .collect();
        let expected = [
            summary.duration_hours,
            summary.metrics.distance_km,
            summary.metrics.mean_speed_kmh,
            summary.metrics.calories,
        ];
        for (parsed, exact) in numbers.iter().zip(expected) {
            assert!((parsed - exact).abs() <= 0.005 + 1e-9);
        }
        assert_eq!(numbers.len(), 4);
    }

    #[test]
    fn test_parse_failures_are_wrapped() {
        let err = training_info("0,Бег,1h", 70.0, 1.75).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Parsing));
        assert_eq!(err.kind(), Some(ErrorKind::Validation));
        assert_eq!(err.field(), Some(Field::Steps));

        let err = training_info("5000,Бег", 70.0, 1.75).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Parsing));
        assert_eq!(err.kind(), Some(ErrorKind::Format));

        let err = training_info("many,Бег,1h", 70.0, 1.75).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::Parse));
    }

    #[test]
    fn test_unknown_activity() {
        let err = training_info("5000,Плавание,1h", 70.0, 1.75).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::UnknownActivity));
        assert_eq!(err.stage(), None);
    }

    #[test]
    fn test_invalid_biometrics_fail_in_estimation() {
        let err = training_info("5000,Бег,1h", 0.0, 1.75).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::CalorieEstimation));
        assert_eq!(err.kind(), Some(ErrorKind::InvalidParameters));

        let err = training_info("5000,Ходьба,1h", 70.0, -1.75).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InvalidParameters));
    }

    #[test]
    fn test_summary_json() {
        let calculator = TrainingCalculator::new(70.0, 1.75);
        let json = calculator.summary_json("5000,Бег,1h").unwrap();
        let summary: TrainingSummary = serde_json::from_str(&json).unwrap();

        assert_eq!(summary.kind, ActivityKind::Running);
        assert_eq!(summary.activity, "Бег");
        assert_eq!(summary.steps, 5000);
        assert_eq!(summary.metrics.calories, 275.625);
        assert_eq!(summary.biometrics, calculator.biometrics());
    }
}
