//! # Credentials
//!
//! Password hashing for stored user records. Nothing here authenticates
//! requests; it only keeps clear-text passwords out of the backing store.

pub mod crypto;
pub mod errors;

pub use errors::{AuthError, AuthResult};
