//! Error types for download history operations.

use thiserror::Error;

/// Errors that can occur while reading or writing download history.
#[derive(Debug, Clone, Error)]
pub enum HistoryError {
    /// Database operation failed.
    #[error("history database error: {message}")]
    Database {
        /// Human-readable database error text.
        message: String,
    },

    /// A stored timestamp could not be read back.
    #[error(
        "invalid timestamp '{value}' in download history\n  Suggestion: Delete the history file to start over, or fix the row by hand"
    )]
    InvalidTimestamp {
        /// The stored text.
        value: String,
    },
}

impl From<sqlx::Error> for HistoryError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database {
            message: err.to_string(),
        }
    }
}
