//! Exit code logic for the archiver process.
//!
//! Single responsibility: turn a run result into the process exit outcome.

use crate::ProcessExit;

/// Maps a run result to the process exit outcome, printing any failure.
///
/// Every error kind (bad date, no history, no date configuration, download
/// failure) collapses to [`ProcessExit::Failure`].
pub(crate) fn determine_exit_outcome(result: anyhow::Result<ProcessExit>) -> ProcessExit {
    match result {
        Ok(exit) => exit,
        Err(error) => {
            tracing::debug!(error = ?error, "Run failed");
            eprintln!("Error: {error:#}");
            ProcessExit::Failure
        }
    }
}
