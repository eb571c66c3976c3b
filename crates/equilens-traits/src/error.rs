//! Error types for the equilens engine.
//!
//! Only malformed input is an error. Missing optional series, degenerate
//! arithmetic and empty selections all have defined fallbacks and never
//! surface here.

use thiserror::Error;

/// The main error type for equilens operations.
#[derive(Debug, Error)]
pub enum EquilensError {
    /// A required series is missing from the document.
    #[error("Missing required series: {0}")]
    MissingSeries(String),

    /// A series does not have the same length as `dates`.
    #[error("Length mismatch for `{field}`: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Name of the offending series.
        field: String,
        /// Length of `dates`.
        expected: usize,
        /// Length of the offending series.
        actual: usize,
    },

    /// Dates are not in non-decreasing order.
    #[error("Dates out of order at index {index}: {previous} > {current}")]
    UnorderedDates {
        /// Index of the first out-of-order date.
        index: usize,
        /// The preceding date.
        previous: String,
        /// The date at `index`.
        current: String,
    },

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a date is out of range or invalid.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// JSON (de)serialization failed.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for equilens operations.
pub type Result<T> = std::result::Result<T, EquilensError>;
