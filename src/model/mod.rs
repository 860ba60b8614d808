//! # Record Model
//!
//! Articles and users as stored by every backend, plus the request bodies
//! used to create and update them.

pub mod article;
pub mod user;

use std::fmt;

use thiserror::Error;

use crate::auth::AuthError;

pub use article::{Article, ArticleDraft, ArticlePatch, NewArticle};
pub use user::{NewUser, User, UserChanges, UserDraft, UserPatch, UserView};

/// Identifier of a record within its collection
pub type RecordId = u64;

/// Result type for model-level validation
pub type ModelResult<T> = Result<T, ModelError>;

/// The two record kinds served by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Article,
    User,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Article => "Article",
            Resource::User => "User",
        }
    }

    /// Collection name used in logs and by the document store
    pub fn collection(&self) -> &'static str {
        match self {
            Resource::Article => "articles",
            Resource::User => "users",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validation failures raised while turning a request body into a record
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A required field was absent or empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The supplied password could not be hashed
    #[error("{0}")]
    Credentials(#[from] AuthError),
}

/// Treats an empty string the same as an absent one.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Presence check for a required text field.
pub(crate) fn required(value: Option<String>, field: &'static str) -> ModelResult<String> {
    non_empty(value).ok_or(ModelError::MissingField(field))
}
