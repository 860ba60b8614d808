//! Article routes
//!
//! `GET/POST /articles` and `GET/PUT/DELETE /articles/:id`.

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::model::{Article, ArticlePatch, NewArticle, Resource};
use crate::observability::Event;
use crate::query::{ListParams, Page};

use super::errors::ApiResult;
use super::state::{log_listing, log_record, parse_id, AppState};

/// Create article routes
pub fn article_routes(state: AppState) -> Router {
    Router::new()
        .route("/articles", get(list_articles).post(create_article))
        .route(
            "/articles/:id",
            get(get_article).put(update_article).delete(delete_article),
        )
        .with_state(state)
}

async fn list_articles(
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> ApiResult<Json<Page<Article>>> {
    let params = ListParams::parse(&raw);
    let page = state
        .repository
        .list_articles(&params.filter, params.pagination)
        .map_err(|e| state.reject("GET /articles", e.into()))?;

    state.metrics.increment_listings();
    log_listing(Resource::Article, page.total, page.data.len());
    Ok(Json(page))
}

async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Article>> {
    let article = parse_id(&id, Resource::Article)
        .and_then(|id| state.repository.get_article(id).map_err(Into::into))
        .map_err(|e| state.reject("GET /articles/:id", e))?;

    state.metrics.increment_reads();
    Ok(Json(article))
}

async fn create_article(
    State(state): State<AppState>,
    body: Result<Json<NewArticle>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Article>)> {
    let Json(input) = body.map_err(|e| state.reject("POST /articles", e.into()))?;
    let article = state
        .repository
        .create_article(input)
        .map_err(|e| state.reject("POST /articles", e.into()))?;

    state.metrics.increment_created();
    log_record(Event::RecordCreated, Resource::Article, article.id);
    Ok((StatusCode::CREATED, Json(article)))
}

async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ArticlePatch>, JsonRejection>,
) -> ApiResult<Json<Article>> {
    let id = parse_id(&id, Resource::Article).map_err(|e| state.reject("PUT /articles/:id", e))?;
    let Json(patch) = body.map_err(|e| state.reject("PUT /articles/:id", e.into()))?;
    let article = state
        .repository
        .update_article(id, patch)
        .map_err(|e| state.reject("PUT /articles/:id", e.into()))?;

    state.metrics.increment_updated();
    log_record(Event::RecordUpdated, Resource::Article, article.id);
    Ok(Json(article))
}

async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id, Resource::Article)
        .and_then(|id| {
            state.repository.delete_article(id)?;
            Ok(id)
        })
        .map_err(|e| state.reject("DELETE /articles/:id", e))?;

    state.metrics.increment_deleted();
    log_record(Event::RecordDeleted, Resource::Article, id);
    Ok(StatusCode::NO_CONTENT)
}
