//! Month partitioning of a date range.

use super::{DateRange, MonthJob, Timestamp};

/// Lazy iterator over the months touched by a [`DateRange`].
///
/// Yields months in strictly increasing order, from the month containing
/// `start` through the month containing `end`. A reversed range yields
/// nothing.
#[derive(Debug, Clone)]
pub struct MonthJobs {
    cursor: Option<MonthJob>,
    end: Timestamp,
}

impl MonthJobs {
    /// Starts iteration at the first day of `range.start`'s month.
    #[must_use]
    pub fn new(range: &DateRange) -> Self {
        let cursor = (!range.is_reversed()).then(|| MonthJob::containing(range.start));
        Self {
            cursor,
            end: range.end,
        }
    }
}

impl Iterator for MonthJobs {
    type Item = MonthJob;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        match current.first_moment() {
            Some(moment) if moment <= self.end => {
                self.cursor = current.next();
                Some(current)
            }
            _ => {
                self.cursor = None;
                None
            }
        }
    }
}

/// Collects every month job covering `range`.
#[must_use]
pub fn partition(range: &DateRange) -> Vec<MonthJob> {
    MonthJobs::new(range).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> Timestamp {
        ts(y, m, d, 0, 0, 0)
    }

    fn job(y: i32, m: u32) -> MonthJob {
        MonthJob::new(y, m).unwrap()
    }

    #[test]
    fn test_same_month_yields_single_job() {
        let range = DateRange::new(day(2025, 5, 3), ts(2025, 5, 28, 18, 30, 0));
        assert_eq!(partition(&range), vec![job(2025, 5)]);
    }

    #[test]
    fn test_single_instant_range_yields_its_month() {
        let moment = ts(2025, 5, 17, 9, 0, 0);
        assert_eq!(partition(&DateRange::new(moment, moment)), vec![job(2025, 5)]);
    }

    #[test]
    fn test_multi_month_range_in_order() {
        let range = DateRange::new(day(2025, 1, 15), day(2025, 3, 3));
        assert_eq!(
            partition(&range),
            vec![job(2025, 1), job(2025, 2), job(2025, 3)]
        );
    }

    #[test]
    fn test_range_crossing_year_boundary() {
        let range = DateRange::new(day(2024, 11, 10), day(2025, 1, 5));
        assert_eq!(
            partition(&range),
            vec![job(2024, 11), job(2024, 12), job(2025, 1)]
        );
    }

    #[test]
    fn test_end_on_first_midnight_includes_that_month() {
        let range = DateRange::new(day(2025, 1, 31), day(2025, 2, 1));
        assert_eq!(partition(&range), vec![job(2025, 1), job(2025, 2)]);
    }

    #[test]
    fn test_reversed_range_yields_nothing() {
        let range = DateRange::new(day(2025, 3, 1), day(2025, 1, 1));
        assert!(partition(&range).is_empty());
    }

    #[test]
    fn test_reversed_within_same_month_yields_nothing() {
        let range = DateRange::new(day(2025, 6, 16), ts(2025, 6, 15, 23, 59, 59));
        assert!(partition(&range).is_empty());
    }

    #[test]
    fn test_full_year_has_twelve_months() {
        let range = DateRange::new(day(2023, 1, 1), ts(2023, 12, 31, 23, 59, 59));
        let jobs = partition(&range);
        assert_eq!(jobs.len(), 12);
        assert_eq!(jobs.first(), Some(&job(2023, 1)));
        assert_eq!(jobs.last(), Some(&job(2023, 12)));
    }

    #[test]
    fn test_iterator_is_lazy_and_fused_after_end() {
        let range = DateRange::new(day(2025, 1, 1), day(2025, 1, 20));
        let mut jobs = MonthJobs::new(&range);
        assert_eq!(jobs.next(), Some(job(2025, 1)));
        assert_eq!(jobs.next(), None);
        assert_eq!(jobs.next(), None);
    }
}
