//! # Repository
//!
//! The ten record operations the HTTP layer needs, independent of where
//! records live. `SnapshotRepository` runs them over any `Backend`;
//! `DocumentStore` answers them with store-native queries.

mod errors;
mod snapshot;

pub use errors::{RepositoryError, RepositoryResult};
pub use snapshot::SnapshotRepository;

use crate::model::{Article, ArticlePatch, NewArticle, NewUser, RecordId, UserPatch, UserView};
use crate::query::{ArticleFilter, Page, Pagination};

/// Record operations for articles and users
pub trait Repository: Send + Sync {
    /// Filtered, paginated article listing
    fn list_articles(
        &self,
        filter: &ArticleFilter,
        pagination: Pagination,
    ) -> RepositoryResult<Page<Article>>;

    /// Get a single article by id
    fn get_article(&self, id: RecordId) -> RepositoryResult<Article>;

    /// Validate and store a new article
    fn create_article(&self, input: NewArticle) -> RepositoryResult<Article>;

    /// Merge an update into an existing article
    fn update_article(&self, id: RecordId, patch: ArticlePatch) -> RepositoryResult<Article>;

    /// Remove an article
    fn delete_article(&self, id: RecordId) -> RepositoryResult<()>;

    /// Paginated user listing
    fn list_users(&self, pagination: Pagination) -> RepositoryResult<Page<UserView>>;

    fn get_user(&self, id: RecordId) -> RepositoryResult<UserView>;

    fn create_user(&self, input: NewUser) -> RepositoryResult<UserView>;

    fn update_user(&self, id: RecordId, patch: UserPatch) -> RepositoryResult<UserView>;

    fn delete_user(&self, id: RecordId) -> RepositoryResult<()>;

    /// Backend description for logs
    fn describe(&self) -> String;
}
