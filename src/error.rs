//! Error types for quickdev.

use thiserror::Error;

use crate::features::timelog::TimeLogRecord;

/// All errors produced by quickdev.
#[derive(Debug, Error)]
pub enum QuickDevError {
    /// An operation was attempted in a timer state that does not allow it.
    #[error("Invalid timer state: {0}")]
    InvalidState(String),

    /// A time log was built but the sink refused it.
    ///
    /// The timer has already cleared its accrual; the record is handed back
    /// so the caller can retry or stash it.
    #[error("Time log {} was not saved: {reason}", record.id)]
    LogNotSaved {
        /// The record that could not be persisted.
        record: Box<TimeLogRecord>,
        /// Why the sink failed.
        reason: String,
    },

    /// Configuration could not be read, parsed, or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// The requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User input was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Terminal setup or drawing failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Filesystem error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuickDevError {
    /// Whether this error came from the timer refusing an operation.
    #[must_use]
    pub const fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }
}
