//! User-Agent string for requests to the media service.

/// Default User-Agent (identifies the tool and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("media-archiver/{version} (personal-archive-backup)")
}
