//! Download history: what has been fetched, and when.
//!
//! The planner only needs [`DownloadHistory::latest_timestamp`] to compute a
//! resume span. [`SqliteHistory`] is the persistent implementation that the
//! HTTP downloader also writes to.

mod error;
mod sqlite;

pub use error::HistoryError;
pub use sqlite::{HistoryEntry, SqliteHistory, TIMESTAMP_FORMAT};

use async_trait::async_trait;

use crate::dates::Timestamp;

/// Read access to the latest recorded download.
///
/// This trait uses `async_trait` so planners can hold a `&dyn DownloadHistory`.
#[async_trait]
pub trait DownloadHistory: Send + Sync {
    /// Timestamp of the most recent successful download, if any.
    async fn latest_timestamp(&self) -> Result<Option<Timestamp>, HistoryError>;
}
