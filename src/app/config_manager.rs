//! Configuration lifecycle: load the YAML file, derive CLI date overrides and log level.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use media_archiver::{AppConfig, DateOverrides};
use tracing::debug;

use crate::cli::Args;

/// Config file read when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the config file.
///
/// An explicit `--config` path must exist. The default `config.yaml` is
/// optional; when it is missing the built-in defaults apply.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return AppConfig::load(path)
            .with_context(|| format!("Failed to load config file '{}'", path.display()));
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if !default_path.exists() {
        debug!(path = %default_path.display(), "No config file found, using defaults");
        return Ok(AppConfig::default());
    }
    AppConfig::load(&default_path)
        .with_context(|| format!("Failed to load config file '{}'", default_path.display()))
}

/// Command-line date selection.
pub(crate) fn date_overrides(args: &Args) -> DateOverrides {
    DateOverrides {
        after: args.after.clone(),
        before: args.before.clone(),
        from_last_date: args.from_last_date,
    }
}

/// Log level used when `RUST_LOG` is unset.
///
/// Priority: quiet flag > verbose flag > default (info)
pub(crate) fn resolve_default_log_level(args: &Args) -> &'static str {
    if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
