use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Local;
use media_archiver::{
    AppConfig, Database, DryRunDownloader, HttpMonthDownloader, JobRunner, MonthJob,
    ServiceClient, SqliteHistory, resolve_plan, select_strategy,
};
use tracing::{debug, info};

use crate::ProcessExit;
use crate::app::{config_manager, terminal};
use crate::cli::Args;

pub(crate) async fn run_archiver(args: Args) -> Result<ProcessExit> {
    terminal::init_tracing(config_manager::resolve_default_log_level(&args));
    debug!(?args, "CLI arguments parsed");

    let config = config_manager::load_config(args.config.as_deref())?;
    let overrides = config_manager::date_overrides(&args);

    let strategy = select_strategy(&overrides, &config.dates)?;
    debug!(?strategy, "Selected date strategy");

    let history = open_history(&config.history_path, args.dry_run).await?;
    let now = Local::now().naive_local();
    let plan = resolve_plan(&strategy, &history, now).await?;
    let jobs = plan.jobs();
    debug!(months = jobs.len(), "Planned month jobs");

    if args.dry_run {
        run_dry(&jobs).await?;
        return Ok(ProcessExit::Success);
    }

    let total = run_downloads(&config, history, &jobs, args.force).await?;
    println!("Total downloaded across all months: {total}");
    Ok(ProcessExit::Success)
}

/// Opens the history database. A dry run never writes to disk: an existing
/// file is opened read-only, and with no file it plans against an empty
/// in-memory history.
async fn open_history(path: &Path, dry_run: bool) -> Result<SqliteHistory> {
    if dry_run {
        let db = if path.exists() {
            Database::open_read_only(path).await.with_context(|| {
                format!("Failed to open download history '{}'", path.display())
            })?
        } else {
            debug!(path = %path.display(), "No history file, dry run uses empty history");
            Database::new_in_memory()
                .await
                .context("Failed to open in-memory download history")?
        };
        return Ok(SqliteHistory::new(db));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create history directory '{}'", parent.display())
        })?;
    }
    let db = Database::new(path)
        .await
        .with_context(|| format!("Failed to open download history '{}'", path.display()))?;
    Ok(SqliteHistory::new(db))
}

async fn run_dry(jobs: &[MonthJob]) -> Result<()> {
    println!("Months that would be downloaded:");
    let downloader = DryRunDownloader::stdout();
    JobRunner::new(&downloader).run(jobs).await?;
    println!("Dry run - no files downloaded");
    Ok(())
}

async fn run_downloads(
    config: &AppConfig,
    history: SqliteHistory,
    jobs: &[MonthJob],
    force: bool,
) -> Result<u64> {
    let Some(base_url) = config.service.base_url()? else {
        bail!(
            "no archive service configured\n  Suggestion: Set service.base_url in the config file"
        );
    };

    if force {
        info!("Force mode: ignoring download history");
    }

    let client = ServiceClient::new(base_url, &config.service)?;
    let downloader = HttpMonthDownloader::new(client, history, config.output_dir.clone())
        .with_force(force);
    let summary = JobRunner::new(&downloader).run(jobs).await?;
    Ok(summary.total())
}
