//! # REST API Module
//!
//! HTTP handlers for CRUD over articles and users. Handlers are thin:
//! they parse the request, call the `Repository`, and map its errors onto
//! status codes.

pub mod articles;
pub mod errors;
pub mod state;
pub mod users;

pub use articles::article_routes;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use state::{parse_id, AppState};
pub use users::user_routes;

use axum::Router;

/// Article and user routes on one router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .merge(article_routes(state.clone()))
        .merge(user_routes(state))
}
