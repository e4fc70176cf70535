//! HTTP client wrapper for the media service.
//!
//! Fetches month manifests and streams media files to disk. Files are written
//! to a `.part` sibling first and renamed on completion, so an aborted run
//! never leaves a truncated file under its final name.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};
use url::Url;

use super::error::DownloadError;
use super::manifest::MonthManifest;
use crate::config::ServiceConfig;
use crate::user_agent;

/// HTTP client bound to one service root.
///
/// Create once per run and reuse it for every month to share the connection
/// pool.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl ServiceClient {
    /// Builds a client for `base_url` using the timeouts and token in `service`.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if reqwest rejects the
    /// configuration.
    pub fn new(base_url: Url, service: &ServiceConfig) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .user_agent(user_agent::default_user_agent())
            .connect_timeout(Duration::from_secs(service.connect_timeout_secs))
            .read_timeout(Duration::from_secs(service.read_timeout_secs))
            .gzip(true)
            .build()
            .map_err(DownloadError::ClientBuild)?;

        Ok(Self {
            client,
            base_url,
            api_token: service.api_token().map(str::to_string),
        })
    }

    /// Manifest URL for a month: `{base_url}months/{YYYY}/{MM}`.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::InvalidUrl`] if the join fails.
    pub fn month_url(&self, year: i32, month: u32) -> Result<Url, DownloadError> {
        let relative = format!("months/{year:04}/{month:02}");
        self.base_url
            .join(&relative)
            .map_err(|_| DownloadError::InvalidUrl { url: relative })
    }

    /// Fetches and decodes one manifest page.
    ///
    /// # Errors
    ///
    /// Returns a network, status or [`DownloadError::InvalidManifest`] error.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_manifest(&self, url: &Url) -> Result<MonthManifest, DownloadError> {
        let response = self.send(self.client.get(url.clone()), url.as_str()).await?;
        let manifest = response
            .json::<MonthManifest>()
            .await
            .map_err(|err| DownloadError::InvalidManifest {
                url: url.to_string(),
                reason: err.to_string(),
            })?;
        debug!(items = manifest.items.len(), has_next = manifest.next.is_some(), "Fetched manifest page");
        Ok(manifest)
    }

    /// Streams `url` into `dest`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns a network/status error, or [`DownloadError::Io`] when the file
    /// cannot be written.
    #[instrument(skip(self, dest), fields(url = %url, dest = %dest.display()))]
    pub async fn download_to_file(&self, url: &Url, dest: &Path) -> Result<u64, DownloadError> {
        let response = self.send(self.client.get(url.clone()), url.as_str()).await?;
        let part_path = part_path(dest);

        let file = File::create(&part_path)
            .await
            .map_err(|source| DownloadError::io(&part_path, source))?;
        let mut writer = BufWriter::new(file);
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| DownloadError::from_reqwest(url.as_str(), source))?;
            writer
                .write_all(&chunk)
                .await
                .map_err(|source| DownloadError::io(&part_path, source))?;
            written += chunk.len() as u64;
        }

        writer
            .flush()
            .await
            .map_err(|source| DownloadError::io(&part_path, source))?;
        drop(writer);

        tokio::fs::rename(&part_path, dest)
            .await
            .map_err(|source| DownloadError::io(dest, source))?;

        debug!(bytes = written, "Saved file");
        Ok(written)
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, DownloadError> {
        let request = match &self.api_token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        };
        let response = request
            .send()
            .await
            .map_err(|source| DownloadError::from_reqwest(url, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::from_status(url, status.as_u16()));
        }
        Ok(response)
    }
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}
