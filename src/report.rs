//! Report rendering
//!
//! The text report is a fixed line-oriented template; every numeric field is
//! rendered with two fractional digits and every line ends with `\n`.

use crate::types::TrainingSummary;

const ACTIVITY_LABEL: &str = "Тип тренировки";
const DURATION_LABEL: &str = "Длительность";
const DISTANCE_LABEL: &str = "Дистанция";
const SPEED_LABEL: &str = "Скорость";
const CALORIES_LABEL: &str = "Сожгли калорий";

/// Render the text report for a training summary
pub fn render(summary: &TrainingSummary) -> String {
    let metrics = &summary.metrics;
    format!(
        "{ACTIVITY_LABEL}: {}\n\
         {DURATION_LABEL}: {:.2} ч.\n\
         {DISTANCE_LABEL}: {:.2} км.\n\
         {SPEED_LABEL}: {:.2} км/ч\n\
         {CALORIES_LABEL}: {:.2}\n",
        summary.activity,
        summary.duration_hours,
        metrics.distance_km,
        metrics.mean_speed_kmh,
        metrics.calories,
    )
}
