//! Error types for date parsing.

use thiserror::Error;

/// Errors that can occur while turning user text into calendar values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    /// No accepted format matched the input.
    #[error(
        "unable to parse date '{input}'\n  Suggestion: Use one of: YYYY-MM-DD, YYYY-MM, YYYY/MM/DD, MM/DD/YYYY"
    )]
    Unrecognized {
        /// The text that failed to parse.
        input: String,
    },

    /// A year/month pair does not name a real calendar month.
    #[error("invalid month {year}-{month}: month must be between 1 and 12")]
    InvalidMonth {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },
}

impl DateParseError {
    /// Creates an `Unrecognized` error for the given input.
    #[must_use]
    pub fn unrecognized(input: &str) -> Self {
        Self::Unrecognized {
            input: input.to_string(),
        }
    }
}
