//! Error types for spentcal

use std::fmt;
use std::num::ParseIntError;

use thiserror::Error;

use crate::duration::DurationError;

/// Programmatic classification of a failure, independent of its display text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong number of fields in the raw record
    Format,
    /// A field is not syntactically valid
    Parse,
    /// A field is syntactically valid but out of range
    Validation,
    /// The activity label matches no known activity
    UnknownActivity,
    /// Formula inputs failed the positivity check
    InvalidParameters,
}

/// Record field a parse or validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Steps,
    Activity,
    Duration,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Steps => "steps",
            Field::Activity => "activity",
            Field::Duration => "duration",
        })
    }
}

/// Pipeline stage an inner failure occurred in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parsing,
    CalorieEstimation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Parsing => "parsing",
            Stage::CalorieEstimation => "calorie estimation",
        })
    }
}

/// Underlying syntax error for a record field
#[derive(Debug, Error)]
pub enum FieldSyntaxError {
    #[error(transparent)]
    Integer(#[from] ParseIntError),

    #[error(transparent)]
    Duration(#[from] DurationError),
}

/// Errors that can occur while computing a training summary
#[derive(Debug, Error)]
pub enum CalorieError {
    #[error("Invalid record format: expected 3 comma-separated fields, got {0}")]
    Format(usize),

    #[error("Failed to parse {field}: {source}")]
    Parse {
        field: Field,
        #[source]
        source: FieldSyntaxError,
    },

    #[error("Invalid {field}: {reason}")]
    Validation { field: Field, reason: &'static str },

    #[error("Unknown activity: {0:?}")]
    UnknownActivity(String),

    #[error("Invalid input parameters: {0}")]
    InvalidParameters(String),

    #[error("{stage} failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<CalorieError>,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CalorieError {
    /// Wrap an inner failure with the stage it came from
    pub fn in_stage(self, stage: Stage) -> Self {
        CalorieError::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// Kind of the root failure, looking through stage wrappers.
    ///
    /// JSON encoding failures carry no record-level kind and return `None`.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            CalorieError::Format(_) => Some(ErrorKind::Format),
            CalorieError::Parse { .. } => Some(ErrorKind::Parse),
            CalorieError::Validation { .. } => Some(ErrorKind::Validation),
            CalorieError::UnknownActivity(_) => Some(ErrorKind::UnknownActivity),
            CalorieError::InvalidParameters(_) => Some(ErrorKind::InvalidParameters),
            CalorieError::Stage { source, .. } => source.kind(),
            CalorieError::Json(_) => None,
        }
    }

    /// Stage the failure was raised in, if it was wrapped
    pub fn stage(&self) -> Option<Stage> {
        match self {
            CalorieError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Record field the root failure refers to, if any
    pub fn field(&self) -> Option<Field> {
        match self {
            CalorieError::Parse { field, .. } | CalorieError::Validation { field, .. } => {
                Some(*field)
            }
            CalorieError::Stage { source, .. } => source.field(),
            _ => None,
        }
    }
}
