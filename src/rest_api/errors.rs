//! # REST API Errors
//!
//! Every failed request answers with `{ "error": <message>, "code": <status> }`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::model::{ModelError, Resource};
use crate::repository::RepositoryError;

/// Result type for REST handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// REST API errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// No record with the requested id
    #[error("{0} not found")]
    NotFound(Resource),

    /// Missing field or unreadable request body
    #[error("{0}")]
    BadRequest(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Raw message of the underlying failure
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(resource) => ApiError::NotFound(resource),
            RepositoryError::Invalid(ModelError::MissingField(_)) => {
                ApiError::BadRequest(err.to_string())
            }
            RepositoryError::Invalid(ModelError::Credentials(_)) | RepositoryError::Storage(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
