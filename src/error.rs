//! Unified error handling for the ondo crate
//!
//! Domain modules keep their own error enums ([`TrendError`] for the
//! analysis, [`ChartError`] for rendering). This module wraps them, together
//! with I/O and serialization failures, in a single [`Error`] so they can
//! cross module boundaries.
//!
//! # Architecture
//!
//! - [`OndoErrorTrait`] - Common interface implemented by the error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors

use std::io;
use thiserror::Error;

pub use crate::analytics::TrendError;
pub use crate::chart::ChartError;

/// Common trait for ondo error types
pub trait OndoErrorTrait: std::error::Error {
    /// Check if retrying the same operation could succeed
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed input table
    Input,
    /// Invalid analysis options
    Analysis,
    /// Chart rendering failures
    Render,
    /// File system and export errors
    Storage,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Short human-readable name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input error",
            Self::Analysis => "analysis error",
            Self::Render => "render error",
            Self::Storage => "storage error",
            Self::Config => "config error",
            Self::Other => "other error",
        }
    }
}

impl OndoErrorTrait for TrendError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        if self.is_input_error() {
            ErrorCategory::Input
        } else {
            ErrorCategory::Analysis
        }
    }
}

impl OndoErrorTrait for ChartError {
    fn is_recoverable(&self) -> bool {
        // Output directory may become writable
        matches!(self, Self::Io(_))
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Render
    }
}

/// Unified error type for the ondo crate
#[derive(Error, Debug)]
pub enum Error {
    /// Analysis errors (input validation, options)
    #[error("Trend error: {0}")]
    Trend(#[from] TrendError),

    /// Chart rendering errors
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl OndoErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Trend(e) => e.is_recoverable(),
            Self::Chart(e) => e.is_recoverable(),
            Self::Csv(e) => e.is_io_error(),
            Self::Io(_) => true,
            Self::Json(_) => false,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Trend(e) => e.category(),
            Self::Chart(e) => e.category(),
            Self::Csv(e) if e.is_io_error() => ErrorCategory::Storage,
            Self::Csv(_) => ErrorCategory::Input,
            Self::Io(_) | Self::Json(_) => ErrorCategory::Storage,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
