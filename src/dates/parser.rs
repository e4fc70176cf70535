//! Multi-format date parsing.

use chrono::format::{Parsed, StrftimeItems, parse};

use super::{DateParseError, Timestamp};

/// Accepted formats in priority order.
///
/// The first format that consumes the whole input wins; `YYYY/MM/DD` is tried
/// before `MM/DD/YYYY`, so ambiguous input resolves by structure alone.
pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y-%m", "%Y/%m/%d", "%m/%d/%Y"];

/// Parses `text` into a midnight timestamp.
///
/// Month-only input (`YYYY-MM`) lands on the first day of the month.
///
/// # Errors
///
/// Returns [`DateParseError::Unrecognized`] when none of [`DATE_FORMATS`]
/// matches.
pub fn parse_date(text: &str) -> Result<Timestamp, DateParseError> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| parse_with_format(trimmed, format))
        .ok_or_else(|| DateParseError::unrecognized(text))
}

fn parse_with_format(text: &str, format: &str) -> Option<Timestamp> {
    if !has_four_digit_year(text, format) {
        return None;
    }
    let mut parsed = Parsed::default();
    parse(&mut parsed, text, StrftimeItems::new(format)).ok()?;
    if !format.contains("%d") {
        parsed.set_day(1).ok()?;
    }
    parsed.to_naive_date().ok()?.and_hms_opt(0, 0, 0)
}

/// chrono's `%Y` takes 1 to 4 digits or a signed year of any width; every
/// accepted format requires exactly four unsigned digits.
fn has_four_digit_year(text: &str, format: &str) -> bool {
    let separator = if format.contains('/') { '/' } else { '-' };
    let year = if format.starts_with("%Y") {
        text.split(separator).next()
    } else {
        text.rsplit(separator).next()
    };
    year.is_some_and(|year| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
}
