//! The full set of collections held by a backend.

use serde::{Deserialize, Serialize};

use crate::model::{Article, RecordId, User};

use super::errors::{StorageError, StorageResult};

/// The id after `id`, or a corrupt-data error when ids are exhausted
pub(crate) fn successor(collection: &str, id: RecordId) -> StorageResult<RecordId> {
    id.checked_add(1)
        .ok_or_else(|| StorageError::corrupt(collection, format!("id {} has no successor", id)))
}

/// Articles and users plus the next id to hand out for each.
///
/// Ids come from these counters rather than from collection length, so a
/// deleted id is never reused.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub articles: Vec<Article>,

    #[serde(default)]
    pub users: Vec<User>,

    #[serde(default)]
    next_article_id: RecordId,

    #[serde(default)]
    next_user_id: RecordId,
}

impl Dataset {
    pub fn new() -> Self {
        Self {
            articles: Vec::new(),
            users: Vec::new(),
            next_article_id: 1,
            next_user_id: 1,
        }
    }

    /// Raise each counter above every id already present.
    ///
    /// Files written before counters existed (or edited by hand) load
    /// without counters; this keeps new ids collision-free for them. An id
    /// with no successor is reported as corrupt data.
    pub fn normalize(&mut self) -> StorageResult<()> {
        let max_article = self.articles.iter().map(|a| a.id).max().unwrap_or(0);
        let max_user = self.users.iter().map(|u| u.id).max().unwrap_or(0);

        self.next_article_id = self.next_article_id.max(successor("articles", max_article)?);
        self.next_user_id = self.next_user_id.max(successor("users", max_user)?);
        Ok(())
    }

    pub fn allocate_article_id(&mut self) -> StorageResult<RecordId> {
        let id = self.next_article_id.max(1);
        self.next_article_id = successor("articles", id)?;
        Ok(id)
    }

    pub fn allocate_user_id(&mut self) -> StorageResult<RecordId> {
        let id = self.next_user_id.max(1);
        self.next_user_id = successor("users", id)?;
        Ok(id)
    }

    pub fn next_article_id(&self) -> RecordId {
        self.next_article_id
    }

    pub fn next_user_id(&self) -> RecordId {
        self.next_user_id
    }

    pub fn article(&self, id: RecordId) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    pub fn article_mut(&mut self, id: RecordId) -> Option<&mut Article> {
        self.articles.iter_mut().find(|a| a.id == id)
    }

    pub fn user(&self, id: RecordId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_mut(&mut self, id: RecordId) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    /// Remove an article, returning it if it existed
    pub fn remove_article(&mut self, id: RecordId) -> Option<Article> {
        let idx = self.articles.iter().position(|a| a.id == id)?;
        Some(self.articles.remove(idx))
    }

    /// Remove a user, returning it if it existed
    pub fn remove_user(&mut self, id: RecordId) -> Option<User> {
        let idx = self.users.iter().position(|u| u.id == id)?;
        Some(self.users.remove(idx))
    }
}
