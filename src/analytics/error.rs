//! Error types for topic trend analysis

use thiserror::Error;

/// Errors that can occur while preparing or analysing topic trends
#[derive(Debug, Error)]
pub enum TrendError {
    #[error("year column required")]
    MissingYearColumn,

    #[error("Non-numeric year at row {row}: {value:?}")]
    NonNumericYear { row: usize, value: String },

    #[error("Invalid window size: {0}")]
    InvalidWindowSize(usize),

    #[error("Invalid p-value threshold: {0} (must be within 0..=1)")]
    InvalidThreshold(f64),

    #[error("Shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Topic not found: {0}")]
    UnknownTopic(String),
}

impl TrendError {
    /// Whether the error comes from malformed input rather than bad options
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingYearColumn
                | Self::NonNumericYear { .. }
                | Self::ShapeMismatch { .. }
                | Self::UnknownTopic(_)
        )
    }
}

/// Result type for trend analysis operations
pub type TrendResult<T> = Result<T, TrendError>;
