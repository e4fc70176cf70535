//! Downloader that only reports the months it would fetch.

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use super::MonthDownloader;
use super::error::DownloadError;
use crate::dates::MonthJob;

/// Prints `- YYYY-MM` for each planned month and downloads nothing.
///
/// Output goes to the supplied writer (stdout in the CLI).
pub struct DryRunDownloader<W: Write + Send> {
    out: Mutex<W>,
}

impl DryRunDownloader<std::io::Stdout> {
    /// Dry-run reporter writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> DryRunDownloader<W> {
    /// Dry-run reporter writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Returns the writer, for inspecting captured output.
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl<W: Write + Send> MonthDownloader for DryRunDownloader<W> {
    async fn download_month(&self, year: i32, month: u32) -> Result<u64, DownloadError> {
        let job = MonthJob::new(year, month)?;
        info!(month = %job, "Dry run: would download month");
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        writeln!(out, "- {job}").map_err(|source| DownloadError::io("<dry-run output>", source))?;
        Ok(0)
    }
}
