//! Article records and their create/update bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{non_empty, required, ModelResult, RecordId};

/// A stored article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: RecordId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub contents: String,

    #[serde(default)]
    pub created_by: String,

    #[serde(default)]
    pub is_published: bool,

    #[serde(default)]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Merge an update into this article.
    ///
    /// Empty strings leave the existing text untouched; `is_published`
    /// applies whenever it is supplied, `false` included.
    pub fn apply(&mut self, patch: ArticlePatch, now: DateTime<Utc>) {
        if let Some(title) = non_empty(patch.title) {
            self.title = title;
        }
        if let Some(contents) = non_empty(patch.contents) {
            self.contents = contents;
        }
        if let Some(is_published) = patch.is_published {
            self.is_published = is_published;
        }
        self.updated_at = now;
    }
}

/// Body of a create request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewArticle {
    pub title: Option<String>,
    pub contents: Option<String>,
    pub created_by: Option<String>,
    pub is_published: Option<bool>,
}

impl NewArticle {
    /// Presence-check the body before an id is allocated for it.
    pub fn validate(self) -> ModelResult<ArticleDraft> {
        Ok(ArticleDraft {
            title: required(self.title, "title")?,
            contents: required(self.contents, "contents")?,
            created_by: required(self.created_by, "created_by")?,
            is_published: self.is_published.unwrap_or(false),
        })
    }
}

/// A validated article waiting for its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub contents: String,
    pub created_by: String,
    pub is_published: bool,
}

impl ArticleDraft {
    pub fn into_article(self, id: RecordId, now: DateTime<Utc>) -> Article {
        Article {
            id,
            title: self.title,
            contents: self.contents,
            created_by: self.created_by,
            is_published: self.is_published,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of an update request. `created_by` is fixed at creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub contents: Option<String>,
    pub is_published: Option<bool>,
}
