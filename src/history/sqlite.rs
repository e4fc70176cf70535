//! SQLite-backed download history.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tracing::{debug, instrument};

use super::{DownloadHistory, HistoryError};
use crate::dates::{MonthJob, Timestamp};
use crate::db::Database;

/// Storage format for timestamps; sorts chronologically as text.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Insert payload for one downloaded item.
#[derive(Debug, Clone)]
pub struct HistoryEntry<'a> {
    /// Service-side item identifier.
    pub item_id: &'a str,
    /// Month the item was listed under.
    pub month: MonthJob,
    /// When the media was captured, if the service reports it.
    pub taken_at: Option<Timestamp>,
    /// Where the file was written.
    pub file_path: &'a str,
    /// When the download finished.
    pub downloaded_at: Timestamp,
}

/// Download history persisted in the `download_history` table.
#[derive(Debug, Clone)]
pub struct SqliteHistory {
    db: Database,
}

impl SqliteHistory {
    /// Creates a history over an open database.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Records a downloaded item, replacing any earlier row for the same item.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Database`] if the write fails.
    #[instrument(skip(self, entry), fields(item_id = %entry.item_id, month = %entry.month))]
    pub async fn record(&self, entry: &HistoryEntry<'_>) -> Result<(), HistoryError> {
        let taken_at = entry
            .taken_at
            .map(|value| value.format(TIMESTAMP_FORMAT).to_string());
        let downloaded_at = entry.downloaded_at.format(TIMESTAMP_FORMAT).to_string();

        sqlx::query(
            r"INSERT INTO download_history (item_id, month, taken_at, file_path, downloaded_at)
              VALUES (?, ?, ?, ?, ?)
              ON CONFLICT(item_id) DO UPDATE SET
                month = excluded.month,
                taken_at = excluded.taken_at,
                file_path = excluded.file_path,
                downloaded_at = excluded.downloaded_at",
        )
        .bind(entry.item_id)
        .bind(entry.month.to_string())
        .bind(taken_at)
        .bind(entry.file_path)
        .bind(downloaded_at)
        .execute(self.db.pool())
        .await?;

        debug!("Recorded download");
        Ok(())
    }

    /// Returns true when `item_id` has been downloaded before.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Database`] if the query fails.
    #[instrument(skip(self))]
    pub async fn contains(&self, item_id: &str) -> Result<bool, HistoryError> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM download_history WHERE item_id = ? LIMIT 1")
                .bind(item_id)
                .fetch_optional(self.db.pool())
                .await?;
        Ok(found.is_some())
    }

    /// Number of items recorded.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Database`] if the query fails.
    pub async fn count(&self) -> Result<i64, HistoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM download_history")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl DownloadHistory for SqliteHistory {
    #[instrument(skip(self))]
    async fn latest_timestamp(&self) -> Result<Option<Timestamp>, HistoryError> {
        let latest: Option<String> =
            sqlx::query_scalar("SELECT MAX(downloaded_at) FROM download_history")
                .fetch_one(self.db.pool())
                .await?;

        latest
            .map(|value| {
                NaiveDateTime::parse_from_str(&value, TIMESTAMP_FORMAT)
                    .map_err(|_| HistoryError::InvalidTimestamp { value })
            })
            .transpose()
    }
}
