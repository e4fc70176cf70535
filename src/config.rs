//! Typed application configuration loaded from YAML.
//!
//! Every section and field is optional. Defaults:
//! - `output_dir`: `downloads`
//! - `history_path`: `download_history.db`
//! - `service.connect_timeout_secs`: 30
//! - `service.read_timeout_secs`: 300
//! - `dates.*`: unset (no date selection)
//!
//! ```yaml
//! dates:
//!   after: "2025-01-01"
//!   before: "2025-06-30"
//! service:
//!   base_url: "https://media.example.com/api/"
//!   api_token: "secret"
//! output_dir: "./downloads"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Default HTTP connect timeout (30 seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large videos).
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 300;

const DEFAULT_OUTPUT_DIR: &str = "downloads";
const DEFAULT_HISTORY_PATH: &str = "download_history.db";
const MAX_TIMEOUT_SECS: u64 = 3600;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Read {
        /// Config path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML for this schema.
    #[error("failed to parse config: {source}")]
    Parse {
        /// Underlying YAML error.
        #[from]
        source: serde_yaml::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Dotted field name.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Which dates to download when no CLI override is given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatesConfig {
    /// Resume from the day after the last recorded download.
    pub from_last_date: bool,
    /// Download only the month containing this date.
    pub single_date: Option<String>,
    /// Download on/after this date.
    pub after: Option<String>,
    /// Download on/before this date; defaults to now.
    pub before: Option<String>,
}

impl DatesConfig {
    /// `single_date`, ignoring blank values.
    #[must_use]
    pub fn single_date(&self) -> Option<&str> {
        non_blank(self.single_date.as_deref())
    }

    /// `after`, ignoring blank values.
    #[must_use]
    pub fn after(&self) -> Option<&str> {
        non_blank(self.after.as_deref())
    }

    /// `before`, ignoring blank values.
    #[must_use]
    pub fn before(&self) -> Option<&str> {
        non_blank(self.before.as_deref())
    }
}

/// Media service connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// API root; month manifests live at `{base_url}months/{YYYY}/{MM}`.
    pub base_url: Option<String>,
    /// Bearer token sent with every request.
    pub api_token: Option<String>,
    /// Connect timeout in seconds (1..=3600).
    pub connect_timeout_secs: u64,
    /// Read timeout in seconds (1..=3600).
    pub read_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_token: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

impl ServiceConfig {
    /// Parsed `base_url`, if configured.
    ///
    /// A trailing `/` is added so relative joins stay under the API root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the URL is malformed or not http(s).
    pub fn base_url(&self) -> Result<Option<Url>, ConfigError> {
        let Some(raw) = non_blank(self.base_url.as_deref()) else {
            return Ok(None);
        };
        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{raw}/")
        };
        let url = Url::parse(&normalized).map_err(|err| ConfigError::Invalid {
            field: "service.base_url",
            reason: format!("'{raw}' is not a valid URL ({err})"),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                field: "service.base_url",
                reason: format!("'{raw}' must use http or https"),
            });
        }
        Ok(Some(url))
    }

    /// Bearer token, ignoring blank values.
    #[must_use]
    pub fn api_token(&self) -> Option<&str> {
        non_blank(self.api_token.as_deref())
    }
}

/// Whole-application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Date selection defaults.
    pub dates: DatesConfig,
    /// Media service connection.
    pub service: ServiceConfig,
    /// Root directory for downloaded files.
    pub output_dir: PathBuf,
    /// SQLite file holding download history.
    pub history_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dates: DatesConfig::default(),
            service: ServiceConfig::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
        }
    }
}

impl AppConfig {
    /// Reads and validates the YAML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// the errors of [`AppConfig::from_yaml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&raw)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Parses and validates YAML text. A blank or comment-only document
    /// yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let has_content = raw
            .lines()
            .map(str::trim)
            .any(|line| !line.is_empty() && !line.starts_with('#'));
        let config: Self = if has_content {
            serde_yaml::from_str(raw)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates values against runtime constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_timeout_secs(
            "service.connect_timeout_secs",
            self.service.connect_timeout_secs,
        )?;
        validate_timeout_secs("service.read_timeout_secs", self.service.read_timeout_secs)?;
        self.service.base_url()?;
        Ok(())
    }
}

fn validate_timeout_secs(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if !(1..=MAX_TIMEOUT_SECS).contains(&value) {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{value}. Expected range: 1..={MAX_TIMEOUT_SECS}"),
        });
    }
    Ok(())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
