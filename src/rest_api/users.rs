//! User routes
//!
//! Listings are paginated but unfiltered. Responses never carry the
//! password hash.

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::model::{NewUser, Resource, UserPatch, UserView};
use crate::observability::Event;
use crate::query::{ListParams, Page};

use super::errors::ApiResult;
use super::state::{log_listing, log_record, parse_id, AppState};

/// Create user routes
pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(state)
}

async fn list_users(
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> ApiResult<Json<Page<UserView>>> {
    let params = ListParams::parse(&raw);
    let page = state
        .repository
        .list_users(params.pagination)
        .map_err(|e| state.reject("GET /users", e.into()))?;

    state.metrics.increment_listings();
    log_listing(Resource::User, page.total, page.data.len());
    Ok(Json(page))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserView>> {
    let user = parse_id(&id, Resource::User)
        .and_then(|id| state.repository.get_user(id).map_err(Into::into))
        .map_err(|e| state.reject("GET /users/:id", e))?;

    state.metrics.increment_reads();
    Ok(Json(user))
}

async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserView>)> {
    let Json(input) = body.map_err(|e| state.reject("POST /users", e.into()))?;
    let user = state
        .repository
        .create_user(input)
        .map_err(|e| state.reject("POST /users", e.into()))?;

    state.metrics.increment_created();
    log_record(Event::RecordCreated, Resource::User, user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UserPatch>, JsonRejection>,
) -> ApiResult<Json<UserView>> {
    let id = parse_id(&id, Resource::User).map_err(|e| state.reject("PUT /users/:id", e))?;
    let Json(patch) = body.map_err(|e| state.reject("PUT /users/:id", e.into()))?;
    let user = state
        .repository
        .update_user(id, patch)
        .map_err(|e| state.reject("PUT /users/:id", e.into()))?;

    state.metrics.increment_updated();
    log_record(Event::RecordUpdated, Resource::User, user.id);
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id, Resource::User)
        .and_then(|id| {
            state.repository.delete_user(id)?;
            Ok(id)
        })
        .map_err(|e| state.reject("DELETE /users/:id", e))?;

    state.metrics.increment_deleted();
    log_record(Event::RecordDeleted, Resource::User, id);
    Ok(StatusCode::NO_CONTENT)
}
