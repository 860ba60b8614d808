//! # Storage Errors

use std::path::Path;

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Failures of the backing store
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// Disk I/O failure
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Stored data could not be decoded
    #[error("Corrupt data in {source_name}: {message}")]
    Corrupt { source_name: String, message: String },

    /// Refused to overwrite an existing data file
    #[error("Data file already exists: {0}")]
    AlreadyExists(String),

    /// A thread panicked while holding the store lock
    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        StorageError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub fn corrupt(source_name: impl Into<String>, message: impl ToString) -> Self {
        StorageError::Corrupt {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = StorageError::io(
            Path::new("/tmp/data.json"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let message = err.to_string();
        assert!(message.contains("/tmp/data.json"));
        assert!(message.contains("missing"));
    }

    #[test]
    fn test_corrupt_error_message() {
        let err = StorageError::corrupt("data.json", "expected value at line 1");
        assert_eq!(
            err.to_string(),
            "Corrupt data in data.json: expected value at line 1"
        );
    }
}
