//! Resume span derived from download history.

use chrono::Days;

use super::{DateRange, Timestamp};

/// Computes the span still to download after the last recorded download.
///
/// The span starts at midnight on the day after `history_latest` and ends at
/// 23:59:59 on the day of `now`. Returns `None` when there is no history.
///
/// When the last download happened today the result is reversed (tomorrow
/// midnight to tonight), which partitions into no months: there is nothing
/// new to fetch.
#[must_use]
pub fn resume_range(history_latest: Option<Timestamp>, now: Timestamp) -> Option<DateRange> {
    let latest = history_latest?;
    let start = latest
        .date()
        .checked_add_days(Days::new(1))?
        .and_hms_opt(0, 0, 0)?;
    let end = now.date().and_hms_opt(23, 59, 59)?;
    Some(DateRange::new(start, end))
}
