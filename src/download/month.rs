//! Month downloader backed by the media service's HTTP API.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Local;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::client::ServiceClient;
use super::error::DownloadError;
use super::filename::item_filename;
use super::manifest::ManifestItem;
use super::MonthDownloader;
use crate::dates::MonthJob;
use crate::history::{HistoryEntry, SqliteHistory};

/// Downloads every new item of a month into `{output_dir}/{YYYY}/{MM}/`.
///
/// Items already present in history are skipped unless force mode is on.
/// Each saved item is recorded in history immediately, so a later failure in
/// the same month does not lose track of what was already fetched.
#[derive(Debug, Clone)]
pub struct HttpMonthDownloader {
    client: ServiceClient,
    history: SqliteHistory,
    output_dir: PathBuf,
    force: bool,
}

impl HttpMonthDownloader {
    /// Creates a downloader writing under `output_dir`.
    #[must_use]
    pub fn new(client: ServiceClient, history: SqliteHistory, output_dir: PathBuf) -> Self {
        Self {
            client,
            history,
            output_dir,
            force: false,
        }
    }

    /// Ignore history when deciding what to fetch.
    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Returns true when force mode is on.
    #[must_use]
    pub fn is_force(&self) -> bool {
        self.force
    }

    fn month_dir(&self, job: MonthJob) -> PathBuf {
        self.output_dir
            .join(format!("{:04}", job.year()))
            .join(format!("{:02}", job.month()))
    }

    /// Fetches one item; returns false when it was skipped.
    async fn download_item(
        &self,
        job: MonthJob,
        item: &ManifestItem,
        page_url: &Url,
        month_dir: &Path,
    ) -> Result<bool, DownloadError> {
        if !self.force && self.history.contains(&item.id).await? {
            debug!(item_id = %item.id, "Already downloaded, skipping");
            return Ok(false);
        }

        let item_url = page_url
            .join(&item.url)
            .map_err(|_| DownloadError::InvalidUrl {
                url: item.url.clone(),
            })?;
        let dest = month_dir.join(item_filename(item, &item_url));
        self.client.download_to_file(&item_url, &dest).await?;

        let file_path = dest.display().to_string();
        self.history
            .record(&HistoryEntry {
                item_id: &item.id,
                month: job,
                taken_at: item.taken_at(),
                file_path: &file_path,
                downloaded_at: Local::now().naive_local(),
            })
            .await?;
        Ok(true)
    }
}

#[async_trait]
impl MonthDownloader for HttpMonthDownloader {
    #[instrument(skip(self))]
    async fn download_month(&self, year: i32, month: u32) -> Result<u64, DownloadError> {
        let job = MonthJob::new(year, month)?;
        let month_dir = self.month_dir(job);
        tokio::fs::create_dir_all(&month_dir)
            .await
            .map_err(|source| DownloadError::io(&month_dir, source))?;

        let mut visited: HashSet<String> = HashSet::new();
        let mut page_url = Some(self.client.month_url(year, month)?);
        let mut downloaded: u64 = 0;
        let mut skipped: u64 = 0;

        while let Some(url) = page_url.take() {
            if !visited.insert(url.to_string()) {
                warn!(url = %url, "Manifest pagination loops back to a visited page, stopping");
                break;
            }

            let manifest = self.client.fetch_manifest(&url).await?;
            for item in &manifest.items {
                if self.download_item(job, item, &url, &month_dir).await? {
                    downloaded += 1;
                } else {
                    skipped += 1;
                }
            }

            page_url = manifest
                .next
                .as_deref()
                .map(|next| {
                    url.join(next).map_err(|_| DownloadError::InvalidUrl {
                        url: next.to_string(),
                    })
                })
                .transpose()?;
        }

        info!(month = %job, downloaded, skipped, "Month complete");
        Ok(downloaded)
    }
}
