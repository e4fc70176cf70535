//! Calendar planning for month-partitioned downloads.
//!
//! This module turns a requested span into the months that need fetching:
//! - [`parse_date`] - accepts the handful of date spellings users type
//! - [`partition`] / [`MonthJobs`] - splits a [`DateRange`] into [`MonthJob`]s
//! - [`resume_range`] - derives the next span from the last recorded download
//!
//! All timestamps are naive local wall-clock values.
//!
//! # Example
//!
//! ```
//! use media_archiver::dates::{DateRange, MonthJob, parse_date, partition};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let range = DateRange::new(parse_date("2024-11-10")?, parse_date("2025-01-05")?);
//! assert_eq!(
//!     partition(&range),
//!     vec![MonthJob::new(2024, 11)?, MonthJob::new(2024, 12)?, MonthJob::new(2025, 1)?]
//! );
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod error;
mod parser;
mod partition;
mod resume;

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

pub use error::DateParseError;
pub use parser::{DATE_FORMATS, parse_date};
pub use partition::{MonthJobs, partition};
pub use resume::resume_range;

/// Calendar date-time without a timezone.
pub type Timestamp = NaiveDateTime;

/// Inclusive span of timestamps selecting the months to download.
///
/// `start <= end` is expected but not enforced; a reversed range simply
/// partitions into zero months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First moment of the span.
    pub start: Timestamp,
    /// Last moment of the span.
    pub end: Timestamp,
}

impl DateRange {
    /// Creates a range from its two boundaries.
    #[must_use]
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Returns true when the boundaries are reversed.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// One unit of work: a single calendar month to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthJob {
    year: i32,
    month: u32,
}

impl MonthJob {
    /// Creates a job for `year`/`month`.
    ///
    /// # Errors
    ///
    /// Returns [`DateParseError::InvalidMonth`] when `month` is outside 1..=12
    /// or the year is outside the supported calendar.
    pub fn new(year: i32, month: u32) -> Result<Self, DateParseError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(DateParseError::InvalidMonth { year, month });
        }
        Ok(Self { year, month })
    }

    /// Returns the job for the month containing `timestamp`.
    #[must_use]
    pub fn containing(timestamp: Timestamp) -> Self {
        Self {
            year: timestamp.year(),
            month: timestamp.month(),
        }
    }

    /// Calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Calendar month, 1-12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Midnight on the first day of the month.
    #[must_use]
    pub fn first_moment(&self) -> Option<Timestamp> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)?.and_hms_opt(0, 0, 0)
    }

    /// The following month; December rolls over into January of the next year.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        let (year, month) = if self.month == 12 {
            (self.year.checked_add(1)?, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(Self { year, month })
    }
}

impl fmt::Display for MonthJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
