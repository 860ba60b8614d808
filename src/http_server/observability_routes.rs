//! Observability HTTP Routes
//!
//! Health check and request counters.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::observability::MetricsRegistry;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend: String,
}

#[derive(Clone)]
struct ObservabilityState {
    metrics: Arc<MetricsRegistry>,
    backend: String,
}

/// `/health` and `/metrics`
pub fn observability_routes(metrics: Arc<MetricsRegistry>, backend: String) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(ObservabilityState { metrics, backend })
}

/// Health check handler
async fn health_handler(State(state): State<ObservabilityState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.backend,
    };

    (StatusCode::OK, Json(response))
}

/// Metrics handler - returns the live counters as JSON
async fn metrics_handler(State(state): State<ObservabilityState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.metrics.to_json()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            backend: "memory".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["backend"], "memory");
    }
}
