//! Month manifest returned by the media service.
//!
//! ```json
//! {
//!   "items": [
//!     {"id": "p-1", "url": "https://cdn.example/p-1.jpg", "taken_at": "2025-07-03T10:00:00", "filename": "beach.jpg"}
//!   ],
//!   "next": "https://media.example/api/months/2025/07?page=2"
//! }
//! ```

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::dates::{Timestamp, parse_date};

const TAKEN_AT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// One page of a month's listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthManifest {
    /// Media items on this page.
    #[serde(default)]
    pub items: Vec<ManifestItem>,
    /// Next page, absolute or relative to this page's URL.
    #[serde(default)]
    pub next: Option<String>,
}

/// A single downloadable media item.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestItem {
    /// Stable service-side identifier.
    pub id: String,
    /// File location, absolute or relative to the page URL.
    pub url: String,
    /// Capture time as reported by the service.
    #[serde(default)]
    pub taken_at: Option<String>,
    /// Original file name, if the service knows it.
    #[serde(default)]
    pub filename: Option<String>,
}

impl ManifestItem {
    /// Capture time, when present and readable.
    #[must_use]
    pub fn taken_at(&self) -> Option<Timestamp> {
        let raw = self.taken_at.as_deref()?.trim();
        TAKEN_AT_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .or_else(|| parse_date(raw).ok())
    }
}
