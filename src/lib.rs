//! articles-api - REST CRUD over articles and users
//!
//! Listings run through one filter-and-paginate evaluator; records live in
//! a swappable backend (in-process, JSON file, or document store).

pub mod auth;
pub mod cli;
pub mod document;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod query;
pub mod repository;
pub mod rest_api;
pub mod storage;
