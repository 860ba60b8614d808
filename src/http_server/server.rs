//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::observability::{log_event, log_event_with_fields, Event, Logger};
use crate::rest_api::{api_routes, AppState};

use super::config::HttpServerConfig;
use super::observability_routes::observability_routes;

/// HTTP server for the articles API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given handler state
    pub fn with_config(config: HttpServerConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, state: AppState) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let message = config.message.clone();
        let backend = state.repository.describe();

        let mut router = Router::new()
            .route("/", get(move || async move { message }))
            .merge(observability_routes(state.metrics.clone(), backend))
            .merge(api_routes(state));

        // Routes win over files of the same name
        if let Some(dir) = &config.static_dir {
            router = router.fallback_service(ServeDir::new(dir));
        }

        router.layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl+C or SIGTERM, then drain in-flight requests
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?.to_string();

        log_event_with_fields(Event::Serving, &[("addr", addr.as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event(Event::ShutdownComplete);
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            let message = e.to_string();
            Logger::warn("SIGNAL_HANDLER_FAILED", &[("signal", "ctrl_c"), ("error", message.as_str())]);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                let message = e.to_string();
                Logger::warn("SIGNAL_HANDLER_FAILED", &[("signal", "sigterm"), ("error", message.as_str())]);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log_event(Event::ShutdownStart);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::repository::SnapshotRepository;
    use crate::storage::MemoryBackend;

    fn state() -> AppState {
        AppState::new(Arc::new(SnapshotRepository::new(MemoryBackend::new())))
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = HttpServer::with_config(HttpServerConfig::with_port(8080), state());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_static_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = HttpServerConfig {
            static_dir: Some(dir.path().to_path_buf()),
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::with_config(config, state()).router();
    }
}
