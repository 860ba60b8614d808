//! # Credential Errors

use thiserror::Error;

/// Result type for credential operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Credential hashing errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashing_failure_is_internal() {
        let err = AuthError::HashingFailed;
        assert!(err.to_string().starts_with("Internal error"));
    }
}
