//! Free-text cleanup shared by the news and sentiment adapters.

use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

/// Remove markup, decode the common entities, and collapse whitespace.
pub(crate) fn strip_html(html: &str) -> String {
    let without_tags = TAG_RE.replace_all(html, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep at most `max_chars` characters, never splitting a code point.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Parse an RFC 3339 timestamp into Unix seconds, `0` if unparseable.
pub(crate) fn unix_from_rfc3339(raw: &str) -> i64 {
    DateTime::parse_from_rfc3339(raw.trim()).map_or(0, |dt| dt.timestamp())
}

/// The first non-blank candidate, trimmed.
pub(crate) fn first_non_empty<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_html_removes_tags_and_collapses_whitespace() {
        let html = "<p>Shares <b>rose</b>\n  3%&nbsp;today</p>";
        assert_eq!(strip_html(html), "Shares rose 3% today");
    }

    #[test]
    fn strip_html_passes_plain_text_through() {
        assert_eq!(strip_html("no markup here"), "no markup here");
    }

    #[test]
    fn strip_html_decodes_ampersand() {
        assert_eq!(strip_html("S&amp;P 500"), "S&P 500");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn rfc3339_parse_falls_back_to_zero() {
        assert_eq!(unix_from_rfc3339("2024-01-01T00:00:00Z"), 1_704_067_200);
        assert_eq!(unix_from_rfc3339("yesterday"), 0);
    }

    #[test]
    fn first_non_empty_skips_blank_and_missing() {
        assert_eq!(
            first_non_empty([None, Some("  "), Some(" Reuters ")]),
            Some("Reuters")
        );
        assert_eq!(first_non_empty([None, Some("")]), None);
    }

    #[test]
    fn round_to_two_decimals() {
        assert!((round_to(1.23456, 2) - 1.23).abs() < 1e-9);
    }
}
