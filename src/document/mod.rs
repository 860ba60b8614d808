//! # Document Store
//!
//! Holds records as JSON documents per collection and answers listings
//! with store-native filter expressions instead of typed predicates.
//!
//! A listing counts and fetches under a single read guard, so `total` and
//! `data` always describe the same snapshot of the collection.

pub mod filter;

use std::sync::RwLock;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::model::{
    Article, ArticlePatch, NewArticle, NewUser, RecordId, Resource, User, UserPatch, UserView,
};
use crate::observability::Logger;
use crate::query::{ArticleFilter, Page, Pagination};
use crate::repository::{Repository, RepositoryError, RepositoryResult};
use crate::storage::{successor, Dataset, StorageError, StorageResult};

pub use filter::{FilterExpr, FilterOperator, FilterSet};

/// One named collection of documents
#[derive(Debug, Default)]
struct Collection {
    documents: Vec<Value>,
    next_id: RecordId,
}

impl Collection {
    fn from_records<T: Serialize>(records: &[T], next_id: RecordId) -> StorageResult<Self> {
        let documents = records
            .iter()
            .map(|r| serde_json::to_value(r).map_err(|e| StorageError::corrupt("seed", e)))
            .collect::<StorageResult<Vec<_>>>()?;
        Ok(Self { documents, next_id })
    }

    fn allocate_id(&mut self, resource: Resource) -> StorageResult<RecordId> {
        let id = self.next_id.max(1);
        self.next_id = successor(resource.collection(), id)?;
        Ok(id)
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.documents
            .iter()
            .position(|doc| doc.get("id").and_then(Value::as_u64) == Some(id))
    }

    /// Count every match and fetch one window of them in the same scan
    fn find(&self, filters: &FilterSet, pagination: Pagination) -> (usize, Vec<&Value>) {
        let (start, end) = pagination.window();
        let mut total = 0usize;
        let mut page = Vec::new();

        for doc in self.documents.iter().filter(|d| filters.matches(d)) {
            if total >= start && total < end {
                page.push(doc);
            }
            total += 1;
        }

        (total, page)
    }
}

#[derive(Debug, Default)]
struct Collections {
    articles: Collection,
    users: Collection,
}

impl Collections {
    fn get(&self, resource: Resource) -> &Collection {
        match resource {
            Resource::Article => &self.articles,
            Resource::User => &self.users,
        }
    }

    fn get_mut(&mut self, resource: Resource) -> &mut Collection {
        match resource {
            Resource::Article => &mut self.articles,
            Resource::User => &mut self.users,
        }
    }
}

/// In-process document store
#[derive(Debug, Default)]
pub struct DocumentStore {
    collections: RwLock<Collections>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from a dataset (for example one read from a data file)
    pub fn from_dataset(dataset: &Dataset) -> StorageResult<Self> {
        let collections = Collections {
            articles: Collection::from_records(&dataset.articles, dataset.next_article_id())?,
            users: Collection::from_records(&dataset.users, dataset.next_user_id())?,
        };
        Ok(Self {
            collections: RwLock::new(collections),
        })
    }

    fn find<T: DeserializeOwned>(
        &self,
        resource: Resource,
        filters: &FilterSet,
        pagination: Pagination,
    ) -> RepositoryResult<Page<T>> {
        let described = filters.describe();
        Logger::trace(
            "DOCUMENT_FIND",
            &[("collection", resource.collection()), ("filters", described.as_str())],
        );

        let collections = self.collections.read().map_err(|_| StorageError::LockPoisoned)?;
        let (total, docs) = collections.get(resource).find(filters, pagination);

        let data = docs
            .into_iter()
            .map(|doc| decode(resource, doc))
            .collect::<StorageResult<Vec<T>>>()?;

        Ok(Page {
            total,
            page: pagination.page(),
            limit: pagination.limit(),
            data,
        })
    }

    fn find_by_id<T: DeserializeOwned>(&self, resource: Resource, id: RecordId) -> RepositoryResult<T> {
        let collections = self.collections.read().map_err(|_| StorageError::LockPoisoned)?;
        let collection = collections.get(resource);
        let idx = collection
            .position(id)
            .ok_or(RepositoryError::NotFound(resource))?;
        Ok(decode(resource, &collection.documents[idx])?)
    }

    /// Insert a document built from the freshly allocated id
    fn insert<T: Serialize>(
        &self,
        resource: Resource,
        build: impl FnOnce(RecordId) -> T,
    ) -> RepositoryResult<T> {
        let mut collections = self.collections.write().map_err(|_| StorageError::LockPoisoned)?;
        let collection = collections.get_mut(resource);

        let record = build(collection.allocate_id(resource)?);
        collection.documents.push(encode(resource, &record)?);
        Ok(record)
    }

    /// Decode, modify and re-encode one document in place
    fn modify<T: Serialize + DeserializeOwned>(
        &self,
        resource: Resource,
        id: RecordId,
        change: impl FnOnce(&mut T),
    ) -> RepositoryResult<T> {
        let mut collections = self.collections.write().map_err(|_| StorageError::LockPoisoned)?;
        let collection = collections.get_mut(resource);
        let idx = collection
            .position(id)
            .ok_or(RepositoryError::NotFound(resource))?;

        let mut record: T = decode(resource, &collection.documents[idx])?;
        change(&mut record);
        collection.documents[idx] = encode(resource, &record)?;
        Ok(record)
    }

    fn remove(&self, resource: Resource, id: RecordId) -> RepositoryResult<()> {
        let mut collections = self.collections.write().map_err(|_| StorageError::LockPoisoned)?;
        let collection = collections.get_mut(resource);
        let idx = collection
            .position(id)
            .ok_or(RepositoryError::NotFound(resource))?;
        collection.documents.remove(idx);
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(resource: Resource, doc: &Value) -> StorageResult<T> {
    serde_json::from_value(doc.clone()).map_err(|e| StorageError::corrupt(resource.collection(), e))
}

fn encode<T: Serialize>(resource: Resource, record: &T) -> StorageResult<Value> {
    serde_json::to_value(record).map_err(|e| StorageError::corrupt(resource.collection(), e))
}

impl Repository for DocumentStore {
    fn list_articles(
        &self,
        filter: &ArticleFilter,
        pagination: Pagination,
    ) -> RepositoryResult<Page<Article>> {
        let filters = FilterSet::for_articles(filter);
        self.find(Resource::Article, &filters, pagination)
    }

    fn get_article(&self, id: RecordId) -> RepositoryResult<Article> {
        self.find_by_id(Resource::Article, id)
    }

    fn create_article(&self, input: NewArticle) -> RepositoryResult<Article> {
        let draft = input.validate()?;
        self.insert(Resource::Article, |id| draft.into_article(id, Utc::now()))
    }

    fn update_article(&self, id: RecordId, patch: ArticlePatch) -> RepositoryResult<Article> {
        self.modify(Resource::Article, id, |article: &mut Article| {
            article.apply(patch, Utc::now())
        })
    }

    fn delete_article(&self, id: RecordId) -> RepositoryResult<()> {
        self.remove(Resource::Article, id)
    }

    fn list_users(&self, pagination: Pagination) -> RepositoryResult<Page<UserView>> {
        let page: Page<User> = self.find(Resource::User, &FilterSet::new(), pagination)?;
        Ok(page.map(|u| u.view()))
    }

    fn get_user(&self, id: RecordId) -> RepositoryResult<UserView> {
        let user: User = self.find_by_id(Resource::User, id)?;
        Ok(user.view())
    }

    fn create_user(&self, input: NewUser) -> RepositoryResult<UserView> {
        let draft = input.validate()?;
        let user = self.insert(Resource::User, |id| draft.into_user(id))?;
        Ok(user.view())
    }

    fn update_user(&self, id: RecordId, patch: UserPatch) -> RepositoryResult<UserView> {
        let _: User = self.find_by_id(Resource::User, id)?;
        let changes = patch.prepare()?;
        let user = self.modify(Resource::User, id, |user: &mut User| user.apply(changes))?;
        Ok(user.view())
    }

    fn delete_user(&self, id: RecordId) -> RepositoryResult<()> {
        self.remove(Resource::User, id)
    }

    fn describe(&self) -> String {
        "document".to_string()
    }
}
