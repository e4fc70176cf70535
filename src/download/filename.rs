//! On-disk naming for downloaded media.

use url::Url;

use super::manifest::ManifestItem;

/// Maximum file name length (bytes) before truncation.
const MAX_FILENAME_LEN: usize = 180;

/// Replaces path separators, reserved characters and whitespace with `_`,
/// collapsing runs and trimming the result.
pub(crate) fn sanitize_filename_component(value: &str) -> String {
    let mut out = String::new();
    let mut prev_sep = false;
    for ch in value.chars() {
        let mapped = match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\'' => '_',
            c if c.is_whitespace() || c.is_control() => '_',
            c if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') => c,
            _ => '_',
        };
        if mapped == '_' {
            if !prev_sep {
                out.push('_');
                prev_sep = true;
            }
        } else {
            out.push(mapped);
            prev_sep = false;
        }
    }
    let trimmed = out.trim_matches(|c| c == '_' || c == '.');
    truncate_to_boundary(trimmed, MAX_FILENAME_LEN).to_string()
}

fn truncate_to_boundary(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// File name for `item`: `{id}_{name}`, where `name` comes from the manifest
/// or else the last path segment of the download URL.
///
/// Prefixing the id keeps names unique within a month and stable across
/// re-downloads.
pub(crate) fn item_filename(item: &ManifestItem, item_url: &Url) -> String {
    let id = sanitize_filename_component(&item.id);
    let name = item
        .filename
        .as_deref()
        .map(sanitize_filename_component)
        .filter(|name| !name.is_empty())
        .or_else(|| {
            item_url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .map(sanitize_filename_component)
                .filter(|name| !name.is_empty())
        });

    match (id.is_empty(), name) {
        (false, Some(name)) => format!("{id}_{name}"),
        (false, None) => id,
        (true, Some(name)) => name,
        (true, None) => "item".to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str, filename: Option<&str>) -> ManifestItem {
        ManifestItem {
            id: id.to_string(),
            url: String::new(),
            taken_at: None,
            filename: filename.map(str::to_string),
        }
    }

    #[test]
    fn test_sanitize_replaces_separators_and_collapses() {
        assert_eq!(sanitize_filename_component("a/b\\c::d"), "a_b_c_d");
        assert_eq!(sanitize_filename_component("  beach day.jpg "), "beach_day.jpg");
    }

    #[test]
    fn test_sanitize_blocks_parent_traversal() {
        assert_eq!(sanitize_filename_component("../../etc/passwd"), "etc_passwd");
    }

    #[test]
    fn test_sanitize_truncates_long_names() {
        let long = "x".repeat(400);
        assert_eq!(sanitize_filename_component(&long).len(), MAX_FILENAME_LEN);
    }

    #[test]
    fn test_item_filename_prefers_manifest_name() {
        let url = Url::parse("https://cdn.example/raw/123.jpg").unwrap();
        assert_eq!(item_filename(&item("p1", Some("beach.jpg")), &url), "p1_beach.jpg");
    }

    #[test]
    fn test_item_filename_falls_back_to_url_segment() {
        let url = Url::parse("https://cdn.example/raw/123.jpg?sig=abc").unwrap();
        assert_eq!(item_filename(&item("p1", None), &url), "p1_123.jpg");
    }

    #[test]
    fn test_item_filename_uses_id_when_url_has_no_name() {
        let url = Url::parse("https://cdn.example/").unwrap();
        assert_eq!(item_filename(&item("p1", None), &url), "p1");
    }
}
