//! # HTTP Server Module
//!
//! Combines the article and user routers with the operational endpoints
//! into one axum server.
//!
//! # Endpoints
//!
//! - `/` - Greeting message
//! - `/articles`, `/articles/:id` - Article CRUD
//! - `/users`, `/users/:id` - User CRUD
//! - `/health` - Health check
//! - `/metrics` - Request counters

pub mod config;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
