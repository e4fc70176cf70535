//! Choosing which months to download.
//!
//! Selection happens in two steps:
//! 1. [`select_strategy`] picks one [`SelectionStrategy`] from the command-line
//!    overrides and the `dates` config, in a fixed priority order.
//! 2. [`resolve_plan`] turns that strategy into a [`DownloadPlan`], parsing
//!    dates and consulting history as needed.
//!
//! Priority (first match wins):
//! 1. `--after` (with optional `--before`)
//! 2. `--from-last-date`
//! 3. `dates.from_last_date`
//! 4. `dates.single_date`
//! 5. `dates.after` (with optional `dates.before`)

mod error;

pub use error::{PlanError, ResumeOrigin};

use tracing::{info, warn};

use crate::config::DatesConfig;
use crate::dates::{DateRange, MonthJob, Timestamp, parse_date, partition, resume_range};
use crate::history::DownloadHistory;

/// Date selection given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateOverrides {
    /// `--after`
    pub after: Option<String>,
    /// `--before`
    pub before: Option<String>,
    /// `--from-last-date`
    pub from_last_date: bool,
}

/// How the active span is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// `--after`/`--before` from the command line; `before` defaults to now.
    ExplicitRange {
        /// Start date text.
        after: String,
        /// End date text.
        before: Option<String>,
    },
    /// Day after the last recorded download through today.
    Resume {
        /// Which setting asked for it.
        origin: ResumeOrigin,
    },
    /// Only the month containing `date`.
    SingleMonth {
        /// Date text.
        date: String,
    },
    /// `dates.after`/`dates.before` from the config; `before` defaults to now.
    ConfiguredRange {
        /// Start date text.
        after: String,
        /// End date text.
        before: Option<String>,
    },
}

type Candidate = fn(&DateOverrides, &DatesConfig) -> Option<SelectionStrategy>;

/// Strategy candidates in priority order.
const CANDIDATES: [Candidate; 5] = [
    explicit_range,
    cli_resume,
    config_resume,
    config_single_month,
    config_range,
];

/// Picks the strategy for this run.
///
/// # Errors
///
/// Returns [`PlanError::NoDateConfiguration`] when nothing selects any dates.
pub fn select_strategy(
    overrides: &DateOverrides,
    dates: &DatesConfig,
) -> Result<SelectionStrategy, PlanError> {
    if non_blank(overrides.after.as_deref()).is_none()
        && non_blank(overrides.before.as_deref()).is_some()
    {
        warn!("--before has no effect without --after");
    }

    CANDIDATES
        .iter()
        .find_map(|candidate| candidate(overrides, dates))
        .ok_or(PlanError::NoDateConfiguration)
}

fn explicit_range(overrides: &DateOverrides, _: &DatesConfig) -> Option<SelectionStrategy> {
    let after = non_blank(overrides.after.as_deref())?;
    Some(SelectionStrategy::ExplicitRange {
        after: after.to_string(),
        before: non_blank(overrides.before.as_deref()).map(str::to_string),
    })
}

fn cli_resume(overrides: &DateOverrides, _: &DatesConfig) -> Option<SelectionStrategy> {
    overrides.from_last_date.then_some(SelectionStrategy::Resume {
        origin: ResumeOrigin::CommandLine,
    })
}

fn config_resume(_: &DateOverrides, dates: &DatesConfig) -> Option<SelectionStrategy> {
    dates.from_last_date.then_some(SelectionStrategy::Resume {
        origin: ResumeOrigin::Config,
    })
}

fn config_single_month(_: &DateOverrides, dates: &DatesConfig) -> Option<SelectionStrategy> {
    let date = dates.single_date()?;
    Some(SelectionStrategy::SingleMonth {
        date: date.to_string(),
    })
}

fn config_range(_: &DateOverrides, dates: &DatesConfig) -> Option<SelectionStrategy> {
    let after = dates.after()?;
    Some(SelectionStrategy::ConfiguredRange {
        after: after.to_string(),
        before: dates.before().map(str::to_string),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// The resolved work for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPlan {
    /// Every month touched by the range.
    Range(DateRange),
    /// Exactly one month.
    SingleMonth(MonthJob),
}

impl DownloadPlan {
    /// Months to download, in chronological order.
    #[must_use]
    pub fn jobs(&self) -> Vec<MonthJob> {
        match self {
            Self::Range(range) => partition(range),
            Self::SingleMonth(job) => vec![*job],
        }
    }
}

/// Resolves `strategy` into concrete months.
///
/// `now` closes open-ended ranges and the resume span.
///
/// # Errors
///
/// Returns [`PlanError::InvalidDate`] for unparsable dates,
/// [`PlanError::NoHistory`] when resuming with empty history, and
/// [`PlanError::History`] when history cannot be read.
pub async fn resolve_plan(
    strategy: &SelectionStrategy,
    history: &dyn DownloadHistory,
    now: Timestamp,
) -> Result<DownloadPlan, PlanError> {
    match strategy {
        SelectionStrategy::ExplicitRange { after, before }
        | SelectionStrategy::ConfiguredRange { after, before } => {
            let range = explicit_range_between(after, before.as_deref(), now)?;
            info!(range = %range, "Processing date range");
            Ok(DownloadPlan::Range(range))
        }
        SelectionStrategy::Resume { origin } => {
            let latest = history.latest_timestamp().await?;
            let range = resume_range(latest, now).ok_or(PlanError::NoHistory { origin: *origin })?;
            if let Some(latest) = latest {
                info!(
                    last_download = %latest.format("%Y-%m-%d %H:%M:%S"),
                    "Resuming from last download"
                );
            }
            if range.is_reversed() {
                info!("Last download was today, nothing new to download");
            } else {
                info!(range = %range, "New range");
            }
            Ok(DownloadPlan::Range(range))
        }
        SelectionStrategy::SingleMonth { date } => {
            let job = MonthJob::containing(parse_date(date)?);
            info!(month = %job, "Processing single month");
            Ok(DownloadPlan::SingleMonth(job))
        }
    }
}

fn explicit_range_between(
    after: &str,
    before: Option<&str>,
    now: Timestamp,
) -> Result<DateRange, PlanError> {
    let start = parse_date(after)?;
    let end = before.map(parse_date).transpose()?.unwrap_or(now);
    Ok(DateRange::new(start, end))
}
