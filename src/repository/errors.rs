//! # Repository Errors

use thiserror::Error;

use crate::model::{ModelError, Resource};
use crate::storage::StorageError;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Why a record operation did not complete
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// No record with the requested id
    #[error("{0} not found")]
    NotFound(Resource),

    /// The request body failed validation
    #[error(transparent)]
    Invalid(#[from] ModelError),

    /// The backing store failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RepositoryError {
    /// Failures caused by the caller rather than the store
    pub fn is_client_error(&self) -> bool {
        match self {
            RepositoryError::NotFound(_) => true,
            RepositoryError::Invalid(ModelError::MissingField(_)) => true,
            RepositoryError::Invalid(ModelError::Credentials(_)) => false,
            RepositoryError::Storage(_) => false,
        }
    }
}
