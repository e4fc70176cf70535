//! Media Archiver Core Library
//!
//! This library downloads a media archive month by month and resumes from
//! the last successful download instead of re-fetching everything.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`dates`] - Date parsing, month partitioning and resume spans
//! - [`plan`] - Choosing the active span from CLI overrides and config
//! - [`runner`] - Sequential month-by-month execution
//! - [`download`] - Month downloaders (HTTP and dry run)
//! - [`history`] - Download history persistence
//! - [`db`] - Database connection and schema management
//! - [`config`] - Typed YAML configuration

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod dates;
pub mod db;
pub mod download;
pub mod history;
pub mod plan;
pub mod runner;
mod user_agent;

// Re-export commonly used types
pub use config::{AppConfig, ConfigError, DatesConfig, ServiceConfig};
pub use dates::{DateParseError, DateRange, MonthJob, Timestamp, parse_date, partition, resume_range};
pub use db::{Database, DbError};
pub use download::{
    DownloadError, DryRunDownloader, HttpMonthDownloader, MonthDownloader, ServiceClient,
};
pub use history::{DownloadHistory, HistoryEntry, HistoryError, SqliteHistory};
pub use plan::{
    DateOverrides, DownloadPlan, PlanError, ResumeOrigin, SelectionStrategy, resolve_plan,
    select_strategy,
};
pub use runner::{JobRunner, MonthOutcome, RunError, RunSummary};
