//! Error types for the download module.
//!
//! Every variant aborts the current run; nothing here is retried.

use std::path::PathBuf;

use thiserror::Error;

use crate::dates::DateParseError;
use crate::history::HistoryError;

/// Errors that can occur while downloading a month.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The service rejected our credentials.
    #[error(
        "[AUTH] authentication failed (HTTP {status}) fetching {url}\n  Suggestion: Check `service.api_token` in the config file"
    )]
    AuthRequired {
        /// The URL that was rejected.
        url: String,
        /// 401 or 403.
        status: u16,
    },

    /// The month manifest could not be decoded.
    #[error("invalid month manifest from {url}: {reason}")]
    InvalidManifest {
        /// Manifest URL.
        url: String,
        /// Decoder message.
        reason: String,
    },

    /// A manifest or item URL could not be built.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The offending URL text.
        url: String,
    },

    /// Requested month does not exist.
    #[error(transparent)]
    InvalidMonth(#[from] DateParseError),

    /// File system error while writing a download.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// History lookup or write failed.
    #[error(transparent)]
    History(#[from] HistoryError),

    /// HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl DownloadError {
    /// Wraps a reqwest error, separating timeouts from other transport failures.
    #[must_use]
    pub fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Network {
                url: url.to_string(),
                source,
            }
        }
    }

    /// Maps a non-success status to the matching variant.
    #[must_use]
    pub fn from_status(url: &str, status: u16) -> Self {
        if matches!(status, 401 | 403) {
            Self::AuthRequired {
                url: url.to_string(),
                status,
            }
        } else {
            Self::HttpStatus {
                url: url.to_string(),
                status,
            }
        }
    }

    /// Creates an `Io` error for `path`.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_401_is_auth_error_with_suggestion() {
        let err = DownloadError::from_status("https://x.example/months/2025/01", 401);
        assert!(matches!(err, DownloadError::AuthRequired { status: 401, .. }));
        assert!(err.to_string().contains("Suggestion"));
    }

    #[test]
    fn test_status_500_is_http_status_error() {
        let err = DownloadError::from_status("https://x.example/months/2025/01", 500);
        assert!(matches!(err, DownloadError::HttpStatus { status: 500, .. }));
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn test_io_error_message_names_path() {
        let err = DownloadError::io(
            "/tmp/out/a.jpg",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/out/a.jpg"));
    }

    #[test]
    fn test_invalid_month_keeps_date_error() {
        let err = DownloadError::from(DateParseError::InvalidMonth {
            year: 2025,
            month: 0,
        });
        assert!(matches!(
            err,
            DownloadError::InvalidMonth(DateParseError::InvalidMonth { month: 0, .. })
        ));
        assert!(err.to_string().contains("month must be between 1 and 12"));
    }
}
