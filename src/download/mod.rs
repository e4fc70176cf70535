//! Month downloaders.
//!
//! The planner and runner only see the [`MonthDownloader`] trait. Two
//! implementations ship with the crate:
//! - [`HttpMonthDownloader`] - pages through the service's month manifest and
//!   streams new items to `{output_dir}/{YYYY}/{MM}/`, recording them in history
//! - [`DryRunDownloader`] - prints the months it would fetch
//!
//! # Example
//!
//! ```no_run
//! use media_archiver::config::ServiceConfig;
//! use media_archiver::download::{HttpMonthDownloader, MonthDownloader, ServiceClient};
//! use media_archiver::{Database, SqliteHistory};
//! use std::path::{Path, PathBuf};
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let history = SqliteHistory::new(Database::new(Path::new("download_history.db")).await?);
//! let client = ServiceClient::new(Url::parse("https://media.example/api/")?, &ServiceConfig::default())?;
//! let downloader = HttpMonthDownloader::new(client, history, PathBuf::from("downloads"));
//! let count = downloader.download_month(2025, 7).await?;
//! println!("Downloaded {count} new items");
//! # Ok(())
//! # }
//! ```

mod client;
mod dry_run;
mod error;
mod filename;
mod manifest;
mod month;

pub use client::ServiceClient;
pub use dry_run::DryRunDownloader;
pub use error::DownloadError;
pub use manifest::{ManifestItem, MonthManifest};
pub use month::HttpMonthDownloader;

use async_trait::async_trait;

/// Fetches everything new for one calendar month.
///
/// This trait uses `async_trait` so the runner can drive a
/// `&dyn MonthDownloader`.
#[async_trait]
pub trait MonthDownloader: Send + Sync {
    /// Downloads `year`/`month` and returns the number of new items.
    async fn download_month(&self, year: i32, month: u32) -> Result<u64, DownloadError>;
}
