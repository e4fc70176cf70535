//! CLI entry point for the media archiver.

use std::process::ExitCode;

use clap::Parser;

mod app;
mod cli;

use cli::Args;

/// Process exit outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    Success,
    Failure,
}

impl ProcessExit {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    let result = app::runtime::run_archiver(args).await;
    ExitCode::from(app::exit_handler::determine_exit_outcome(result).code())
}
