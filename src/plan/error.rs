//! Error types for download planning.

use std::fmt;

use thiserror::Error;

use crate::dates::DateParseError;
use crate::history::HistoryError;

/// Where a resume request came from; picks the hint shown when history is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeOrigin {
    /// `--from-last-date` on the command line.
    CommandLine,
    /// `dates.from_last_date` in the config file.
    Config,
}

impl ResumeOrigin {
    /// What the user can do instead when there is no history.
    #[must_use]
    pub fn suggestion(self) -> &'static str {
        match self {
            Self::CommandLine => "Use --after/--before to choose specific dates instead",
            Self::Config => {
                "Configure specific dates (`dates.after` or `dates.single_date`) in the config file"
            }
        }
    }
}

impl fmt::Display for ResumeOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CommandLine => "command_line",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

/// Errors that prevent a download plan from being built.
#[derive(Debug, Clone, Error)]
pub enum PlanError {
    /// A configured or command-line date could not be parsed.
    #[error(transparent)]
    InvalidDate(#[from] DateParseError),

    /// Resume was requested but nothing has ever been downloaded.
    #[error("no download history found\n  Suggestion: {}", .origin.suggestion())]
    NoHistory {
        /// Which setting asked for the resume.
        origin: ResumeOrigin,
    },

    /// Neither the command line nor the config selects any dates.
    #[error(
        "no date configuration found\n  Suggestion: Pass --after/--before or --from-last-date, or configure `dates` in the config file"
    )]
    NoDateConfiguration,

    /// Reading history failed.
    #[error(transparent)]
    History(#[from] HistoryError),
}
