//! Repository over a whole-dataset backend.
//!
//! Every operation loads the dataset, works on it in memory, and (for
//! writes) saves it back. One mutex spans each load/modify/save sequence,
//! so concurrent writers cannot interleave and lose each other's updates.

use std::sync::Mutex;

use chrono::Utc;

use crate::model::{
    Article, ArticlePatch, NewArticle, NewUser, RecordId, Resource, UserPatch, UserView,
};
use crate::query::{evaluate, ArticleFilter, MatchAll, Page, Pagination};
use crate::storage::{Backend, Dataset, StorageError};

use super::errors::{RepositoryError, RepositoryResult};
use super::Repository;

/// Runs record operations against a `Backend`
pub struct SnapshotRepository<B: Backend> {
    backend: B,
    lock: Mutex<()>,
}

impl<B: Backend> SnapshotRepository<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run `f` over a consistent snapshot of the dataset
    fn read<R>(&self, f: impl FnOnce(&Dataset) -> RepositoryResult<R>) -> RepositoryResult<R> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        let dataset = self.backend.load()?;
        f(&dataset)
    }

    /// Run `f` over the dataset and persist the result if `f` succeeds
    fn write<R>(
        &self,
        f: impl FnOnce(&mut Dataset) -> RepositoryResult<R>,
    ) -> RepositoryResult<R> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut dataset = self.backend.load()?;
        let result = f(&mut dataset)?;
        self.backend.save(&dataset)?;
        Ok(result)
    }
}

impl<B: Backend> Repository for SnapshotRepository<B> {
    fn list_articles(
        &self,
        filter: &ArticleFilter,
        pagination: Pagination,
    ) -> RepositoryResult<Page<Article>> {
        self.read(|dataset| Ok(evaluate(&dataset.articles, filter, pagination)))
    }

    fn get_article(&self, id: RecordId) -> RepositoryResult<Article> {
        self.read(|dataset| {
            dataset
                .article(id)
                .cloned()
                .ok_or(RepositoryError::NotFound(Resource::Article))
        })
    }

    fn create_article(&self, input: NewArticle) -> RepositoryResult<Article> {
        let draft = input.validate()?;

        self.write(|dataset| {
            let id = dataset.allocate_article_id()?;
            let article = draft.into_article(id, Utc::now());
            dataset.articles.push(article.clone());
            Ok(article)
        })
    }

    fn update_article(&self, id: RecordId, patch: ArticlePatch) -> RepositoryResult<Article> {
        self.write(|dataset| {
            let article = dataset
                .article_mut(id)
                .ok_or(RepositoryError::NotFound(Resource::Article))?;
            article.apply(patch, Utc::now());
            Ok(article.clone())
        })
    }

    fn delete_article(&self, id: RecordId) -> RepositoryResult<()> {
        self.write(|dataset| {
            dataset
                .remove_article(id)
                .map(|_| ())
                .ok_or(RepositoryError::NotFound(Resource::Article))
        })
    }

    fn list_users(&self, pagination: Pagination) -> RepositoryResult<Page<UserView>> {
        self.read(|dataset| Ok(evaluate(&dataset.users, &MatchAll, pagination).map(|u| u.view())))
    }

    fn get_user(&self, id: RecordId) -> RepositoryResult<UserView> {
        self.read(|dataset| {
            dataset
                .user(id)
                .map(|u| u.view())
                .ok_or(RepositoryError::NotFound(Resource::User))
        })
    }

    fn create_user(&self, input: NewUser) -> RepositoryResult<UserView> {
        // Hash outside the lock
        let draft = input.validate()?;

        self.write(|dataset| {
            let id = dataset.allocate_user_id()?;
            let user = draft.into_user(id);
            let view = user.view();
            dataset.users.push(user);
            Ok(view)
        })
    }

    fn update_user(&self, id: RecordId, patch: UserPatch) -> RepositoryResult<UserView> {
        // Checked up front so a missing user costs no hashing
        self.get_user(id)?;
        let changes = patch.prepare()?;

        self.write(|dataset| {
            let user = dataset
                .user_mut(id)
                .ok_or(RepositoryError::NotFound(Resource::User))?;
            user.apply(changes);
            Ok(user.view())
        })
    }

    fn delete_user(&self, id: RecordId) -> RepositoryResult<()> {
        self.write(|dataset| {
            dataset
                .remove_user(id)
                .map(|_| ())
                .ok_or(RepositoryError::NotFound(Resource::User))
        })
    }

    fn describe(&self) -> String {
        self.backend.describe()
    }
}
