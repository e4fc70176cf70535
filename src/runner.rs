//! Sequential month-by-month job execution.
//!
//! Jobs run strictly in order, one at a time. The first failure aborts the
//! whole run: later months never start and the partial total is dropped.

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::dates::MonthJob;
use crate::download::{DownloadError, MonthDownloader};

/// A month that failed and stopped the run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The downloader failed for `job`.
    #[error("download failed for {job}: {source}")]
    Download {
        /// Month being fetched when the failure happened.
        job: MonthJob,
        /// Downloader error.
        #[source]
        source: DownloadError,
    },
}

/// Per-month result of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthOutcome {
    /// Month fetched.
    pub job: MonthJob,
    /// New items downloaded for it.
    pub downloaded: u64,
}

/// Outcome of a run where every month succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    months: Vec<MonthOutcome>,
    total: u64,
}

impl RunSummary {
    /// Items downloaded across all months.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Per-month counts in run order.
    #[must_use]
    pub fn months(&self) -> &[MonthOutcome] {
        &self.months
    }

    fn push(&mut self, outcome: MonthOutcome) {
        self.total += outcome.downloaded;
        self.months.push(outcome);
    }
}

/// Drives month jobs through a [`MonthDownloader`].
pub struct JobRunner<'a> {
    downloader: &'a dyn MonthDownloader,
}

impl<'a> JobRunner<'a> {
    /// Creates a runner over `downloader`.
    #[must_use]
    pub fn new(downloader: &'a dyn MonthDownloader) -> Self {
        Self { downloader }
    }

    /// Runs `jobs` in order and sums their counts.
    ///
    /// An empty job list succeeds with a zero total.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Download`] for the first month that fails; no
    /// further months are attempted.
    #[instrument(skip(self, jobs), fields(months = jobs.len()))]
    pub async fn run(&self, jobs: &[MonthJob]) -> Result<RunSummary, RunError> {
        let mut summary = RunSummary::default();

        for &job in jobs {
            info!(month = %job, "Processing {job}");
            let downloaded = self
                .downloader
                .download_month(job.year(), job.month())
                .await
                .map_err(|source| {
                    warn!(month = %job, error = %source, "Month failed, aborting run");
                    RunError::Download { job, source }
                })?;
            summary.push(MonthOutcome { job, downloaded });
        }

        info!(
            months = summary.months.len(),
            total = summary.total,
            "Total downloaded across all months: {}",
            summary.total
        );
        Ok(summary)
    }
}
