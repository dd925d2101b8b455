//! Error types for the colvalidate library.
//!
//! Only caller misuse is an error. Data that fails validation is reported
//! through masks and the report string, never through this type.

use thiserror::Error;

/// Main error type for colvalidate operations.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A lower bound is greater than its upper bound.
    #[error("Invalid range for '{option}': minimum {min} is greater than maximum {max}")]
    InvalidRange {
        option: &'static str,
        min: String,
        max: String,
    },

    /// A bound that can never be compared against (e.g. NaN).
    #[error("Invalid bound for '{option}': {value}")]
    InvalidBound { option: &'static str, value: String },

    /// Unrecognized `case` option.
    #[error("Unknown case '{0}', expected one of: none, lower, upper, title")]
    UnknownCase(String),

    /// Unrecognized `return_type` option.
    #[error("Unknown return type '{0}', expected one of: none, values, mask_series, mask_frame")]
    UnknownReturnType(String),

    /// A date/time format string chrono cannot render.
    #[error("Invalid date/time format '{0}'")]
    InvalidFormat(String),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for colvalidate operations.
pub type Result<T> = std::result::Result<T, ValidationError>;
