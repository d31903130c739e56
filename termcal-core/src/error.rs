//! Error types for termcal.

use thiserror::Error;

/// Errors that can occur while loading or materializing a timetable.
///
/// Only structurally invalid configuration or unparseable input reaches
/// this type; recoverable problems go through
/// [`Diagnostics`](crate::Diagnostics) instead.
#[derive(Error, Debug)]
pub enum TermcalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid time '{0}' (expected HH:MM)")]
    InvalidTime(String),

    #[error("Timetable file '{0}': {1}")]
    TimetableFile(String, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for termcal operations.
pub type TermcalResult<T> = Result<T, TermcalError>;
