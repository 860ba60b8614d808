//! # Query Parameter Parser
//!
//! Turns raw query-string pairs into a listing configuration. Parsing
//! never fails: anything unusable degrades to "absent" or to a default.

use std::collections::HashMap;

use super::evaluator::Pagination;
use super::filter::ArticleFilter;

/// Parsed listing parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Article filters; ignored by the user listing
    pub filter: ArticleFilter,

    pub pagination: Pagination,
}

impl ListParams {
    /// Parse query parameters from a HashMap
    pub fn parse(params: &HashMap<String, String>) -> Self {
        let mut result = ListParams::default();
        let mut page = 0;
        let mut limit = 0;

        for (key, value) in params {
            // An empty value is treated as if the key were missing
            if value.is_empty() {
                continue;
            }

            match key.as_str() {
                "created_by" => result.filter.created_by = Some(value.clone()),
                "is_published" => result.filter.is_published = Some(parse_flag(value)),
                "title" => result.filter.title = Some(value.clone()),
                "contents" => result.filter.contents = Some(value.clone()),
                "page" => page = positive_or_zero(value),
                "limit" => limit = positive_or_zero(value),
                _ => {}
            }
        }

        result.pagination = Pagination::new(page, limit);
        result
    }

    /// Parse `key=value` pairs as given on a command line
    pub fn parse_pairs<S: AsRef<str>>(pairs: &[S]) -> Self {
        let map = pairs
            .iter()
            .filter_map(|pair| pair.as_ref().split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self::parse(&map)
    }
}

/// `true` only for a case-insensitive "true"
fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Positive integers pass through; everything else becomes 0 (the
/// "use the default" marker understood by `Pagination::new`).
fn positive_or_zero(value: &str) -> u64 {
    match parse_lenient_int(value) {
        Some(n) if n > 0 => n as u64,
        _ => 0,
    }
}

/// Best-effort integer parse that reads the leading integer of a string.
///
/// Leading whitespace and a sign are accepted, parsing stops at the first
/// non-digit (`"12abc"` is 12, `"1.9"` is 1), and overlong digit runs
/// saturate. Returns `None` when no digit precedes the first other char.
pub fn parse_lenient_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut result: i64 = 0;
    let mut seen_digit = false;

    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            break;
        }
        seen_digit = true;
        let digit = i64::from(byte - b'0');
        result = result.saturating_mul(10).saturating_add(digit);
    }

    if !seen_digit {
        return None;
    }

    Some(if negative { -result } else { result })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::evaluator::{DEFAULT_LIMIT, DEFAULT_PAGE};

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_lenient_int() {
        assert_eq!(parse_lenient_int("42"), Some(42));
        assert_eq!(parse_lenient_int("  7"), Some(7));
        assert_eq!(parse_lenient_int("12abc"), Some(12));
        assert_eq!(parse_lenient_int("1.9"), Some(1));
        assert_eq!(parse_lenient_int("-3"), Some(-3));
        assert_eq!(parse_lenient_int("+5"), Some(5));
        assert_eq!(parse_lenient_int("abc"), None);
        assert_eq!(parse_lenient_int(""), None);
        assert_eq!(parse_lenient_int("-"), None);
        assert_eq!(parse_lenient_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn test_defaults() {
        let parsed = ListParams::parse(&HashMap::new());
        assert!(parsed.filter.is_empty());
        assert_eq!(parsed.pagination.page(), DEFAULT_PAGE);
        assert_eq!(parsed.pagination.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let parsed = ListParams::parse(&params(&[("page", "-2"), ("limit", "lots")]));
        assert_eq!(parsed.pagination.page(), DEFAULT_PAGE);
        assert_eq!(parsed.pagination.limit(), DEFAULT_LIMIT);

        let parsed = ListParams::parse(&params(&[("page", "0"), ("limit", "0")]));
        assert_eq!(parsed.pagination, Pagination::default());
    }

    #[test]
    fn test_no_upper_bound_on_limit() {
        let parsed = ListParams::parse(&params(&[("limit", "5000"), ("page", "3")]));
        assert_eq!(parsed.pagination.limit(), 5000);
        assert_eq!(parsed.pagination.page(), 3);
    }

    #[test]
    fn test_is_published_flag() {
        let parsed = ListParams::parse(&params(&[("is_published", "TRUE")]));
        assert_eq!(parsed.filter.is_published, Some(true));

        let parsed = ListParams::parse(&params(&[("is_published", "yes")]));
        assert_eq!(parsed.filter.is_published, Some(false));

        let parsed = ListParams::parse(&params(&[("is_published", "")]));
        assert_eq!(parsed.filter.is_published, None);
    }

    #[test]
    fn test_string_filters() {
        let parsed = ListParams::parse(&params(&[
            ("created_by", "alice"),
            ("title", "Rust"),
            ("contents", ""),
            ("unknown", "x"),
        ]));

        assert_eq!(parsed.filter.created_by.as_deref(), Some("alice"));
        assert_eq!(parsed.filter.title.as_deref(), Some("Rust"));
        assert_eq!(parsed.filter.contents, None);
    }

    #[test]
    fn test_parse_pairs() {
        let parsed = ListParams::parse_pairs(&["page=2", "limit=5", "title=x", "garbage"]);
        assert_eq!(parsed.pagination, Pagination::new(2, 5));
        assert_eq!(parsed.filter.title.as_deref(), Some("x"));
    }
}
