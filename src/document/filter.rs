//! # Document Filter Expressions
//!
//! Store-native predicates over JSON documents. Article listing filters are
//! translated into these before the store scans a collection.

use serde_json::Value;

use crate::query::{contains_ignore_case, ArticleFilter};

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equals
    Eq,

    /// Case-insensitive substring of a string field
    ContainsIgnoreCase,
}

impl FilterOperator {
    /// Get the operator string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::ContainsIgnoreCase => "icontains",
        }
    }
}

/// A filter expression
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Field equals a JSON value
    Eq { field: String, value: Value },

    /// String field contains the needle, ignoring case
    ContainsIgnoreCase { field: String, needle: String },
}

impl FilterExpr {
    /// Create an equality filter
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        FilterExpr::Eq {
            field: field.into(),
            value,
        }
    }

    /// Case-insensitive substring match.
    ///
    /// Both sides are lower-cased and compared literally, the same rule the
    /// typed article filter applies.
    pub fn contains_ignore_case(field: impl Into<String>, needle: impl Into<String>) -> Self {
        FilterExpr::ContainsIgnoreCase {
            field: field.into(),
            needle: needle.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            FilterExpr::Eq { field, .. } | FilterExpr::ContainsIgnoreCase { field, .. } => field,
        }
    }

    pub fn operator(&self) -> FilterOperator {
        match self {
            FilterExpr::Eq { .. } => FilterOperator::Eq,
            FilterExpr::ContainsIgnoreCase { .. } => FilterOperator::ContainsIgnoreCase,
        }
    }

    /// Check if a document matches this filter
    pub fn matches(&self, doc: &Value) -> bool {
        let field_value = match doc.get(self.field()) {
            Some(v) => v,
            None => return false,
        };

        match self {
            FilterExpr::Eq { value, .. } => field_value == value,
            FilterExpr::ContainsIgnoreCase { needle, .. } => field_value
                .as_str()
                .map_or(false, |text| contains_ignore_case(text, needle)),
        }
    }
}

/// A set of filters combined with AND logic
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    pub filters: Vec<FilterExpr>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, filter: FilterExpr) -> Self {
        self.filters.push(filter);
        self
    }

    /// Translate an article listing filter into document predicates
    pub fn for_articles(filter: &ArticleFilter) -> Self {
        let mut set = FilterSet::new();

        if let Some(author) = &filter.created_by {
            set = set.and(FilterExpr::eq("created_by", Value::String(author.clone())));
        }
        if let Some(published) = filter.is_published {
            set = set.and(FilterExpr::eq("is_published", Value::Bool(published)));
        }
        if let Some(needle) = &filter.title {
            set = set.and(FilterExpr::contains_ignore_case("title", needle.as_str()));
        }
        if let Some(needle) = &filter.contents {
            set = set.and(FilterExpr::contains_ignore_case("contents", needle.as_str()));
        }

        set
    }

    /// Compact `field op` listing for logs, e.g. `created_by eq,title icontains`
    pub fn describe(&self) -> String {
        self.filters
            .iter()
            .map(|f| format!("{} {}", f.field(), f.operator().as_str()))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Check if a document matches all filters
    pub fn matches(&self, doc: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_eq_filter() {
        let filter = FilterExpr::eq("created_by", json!("alice"));

        assert!(filter.matches(&json!({"created_by": "alice"})));
        assert!(!filter.matches(&json!({"created_by": "bob"})));
        assert!(!filter.matches(&json!({"title": "no author"})));
    }

    #[test]
    fn test_contains_ignore_case() {
        let filter = FilterExpr::contains_ignore_case("title", "HELLO");

        assert_eq!(filter.operator(), FilterOperator::ContainsIgnoreCase);
        assert!(filter.matches(&json!({"title": "Hello World"})));
        assert!(!filter.matches(&json!({"title": "Goodbye"})));
        assert!(!filter.matches(&json!({"title": 42})));
    }

    #[test]
    fn test_needle_is_literal() {
        let filter = FilterExpr::contains_ignore_case("title", "a.c");

        assert!(filter.matches(&json!({"title": "xa.cx"})));
        assert!(!filter.matches(&json!({"title": "abc"})));
    }

    #[test]
    fn test_long_needle_is_matched_literally() {
        let needle = "k".repeat(100_000);
        let filter = FilterExpr::contains_ignore_case("title", needle.as_str());

        assert!(!filter.matches(&json!({"title": "short"})));
        assert!(filter.matches(&json!({"title": format!("<{}>", needle.to_uppercase())})));
    }

    #[test]
    fn test_case_folding_matches_typed_filter() {
        // Lower-casing maps neither sigma form onto the other
        let filter = FilterExpr::contains_ignore_case("title", "σ");

        assert!(filter.matches(&json!({"title": "ΣΟΦΙΑ"})));
        assert!(!filter.matches(&json!({"title": "λόγος"})));
        assert_eq!(
            filter.matches(&json!({"title": "λόγος"})),
            contains_ignore_case("λόγος", "σ")
        );
    }

    #[test]
    fn test_filter_set_for_articles() {
        let filters =
            FilterSet::for_articles(&ArticleFilter::new().created_by("alice").published(true));

        assert_eq!(filters.filters.len(), 2);
        assert_eq!(filters.describe(), "created_by eq,is_published eq");
        assert!(filters.matches(&json!({"created_by": "alice", "is_published": true})));
        assert!(!filters.matches(&json!({"created_by": "alice", "is_published": false})));
    }

    #[test]
    fn test_empty_filter_set_matches_all() {
        let filters = FilterSet::for_articles(&ArticleFilter::new());
        assert!(filters.filters.is_empty());
        assert!(filters.matches(&json!({})));
    }
}
