//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Download a media archive month by month.
///
/// Dates come from the command line when given, otherwise from the `dates`
/// section of the config file. Accepted date formats: YYYY-MM-DD, YYYY-MM,
/// YYYY/MM/DD, MM/DD/YYYY.
#[derive(Parser, Debug)]
#[command(name = "media-archiver")]
#[command(author, version, about)]
pub struct Args {
    /// Config file path [default: config.yaml]
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ignore history and re-download everything
    #[arg(long)]
    pub force: bool,

    /// Resume from the day after the last download
    #[arg(long)]
    pub from_last_date: bool,

    /// Download on/after DATE (e.g., 2025-07-01)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Download on/before DATE (e.g., 2025-08-31); needs --after
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// List the months that would be downloaded without downloading anything
    #[arg(long)]
    pub dry_run: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
