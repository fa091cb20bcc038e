//! Text helpers shared by the search filters

use chrono::{DateTime, NaiveDateTime};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Lowercase `text` and strip diacritics
///
/// `"João"` becomes `"joao"`, so agents can search without typing accents.
#[must_use]
pub fn fold_text(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Whether `needle` occurs in `haystack` once both are folded
///
/// `needle` must already be folded with [`fold_text`].
#[must_use]
pub fn folded_contains(haystack: &str, folded_needle: &str) -> bool {
    fold_text(haystack).contains(folded_needle)
}

/// Treat an empty filter value as absent
#[must_use]
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Parse an interaction timestamp as exported by the dashboard
///
/// Accepts `2024-06-12 14:30`, ISO 8601 with or without seconds, and RFC 3339
/// with an offset (kept as the wall-clock time it carries).
#[must_use]
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.naive_local())
        })
}
