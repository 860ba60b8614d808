//! # Record Filters
//!
//! Predicates over typed records. Every supplied field must match.

use crate::model::Article;

/// A predicate over records of type `T`
pub trait RecordFilter<T> {
    /// Check if a record satisfies this filter
    fn matches(&self, record: &T) -> bool;
}

/// Imposes no constraint. Used for users, which have no filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchAll;

impl<T> RecordFilter<T> for MatchAll {
    fn matches(&self, _record: &T) -> bool {
        true
    }
}

/// Article listing filters. `None` means the field is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Exact match on the author
    pub created_by: Option<String>,

    /// Exact match on publication state
    pub is_published: Option<bool>,

    /// Case-insensitive substring of the title
    pub title: Option<String>,

    /// Case-insensitive substring of the contents
    pub contents: Option<String>,
}

impl ArticleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created_by(mut self, author: impl Into<String>) -> Self {
        self.created_by = Some(author.into());
        self
    }

    pub fn published(mut self, is_published: bool) -> Self {
        self.is_published = Some(is_published);
        self
    }

    pub fn title_contains(mut self, needle: impl Into<String>) -> Self {
        self.title = Some(needle.into());
        self
    }

    pub fn contents_contains(mut self, needle: impl Into<String>) -> Self {
        self.contents = Some(needle.into());
        self
    }

    /// True when no field is constrained
    pub fn is_empty(&self) -> bool {
        self.created_by.is_none()
            && self.is_published.is_none()
            && self.title.is_none()
            && self.contents.is_none()
    }
}

impl RecordFilter<Article> for ArticleFilter {
    fn matches(&self, article: &Article) -> bool {
        self.created_by
            .as_deref()
            .map_or(true, |author| article.created_by == author)
            && self
                .is_published
                .map_or(true, |published| article.is_published == published)
            && self
                .title
                .as_deref()
                .map_or(true, |needle| contains_ignore_case(&article.title, needle))
            && self
                .contents
                .as_deref()
                .map_or(true, |needle| contains_ignore_case(&article.contents, needle))
    }
}

/// Substring test after lower-casing both sides
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
