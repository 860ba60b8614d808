//! In-process backend.

use std::sync::RwLock;

use super::dataset::Dataset;
use super::errors::{StorageError, StorageResult};
use super::Backend;

/// Keeps the dataset in memory for the life of the process
#[derive(Debug)]
pub struct MemoryBackend {
    dataset: RwLock<Dataset>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            dataset: RwLock::new(Dataset::new()),
        }
    }

    /// Start from an existing dataset (for example one read from a seed file)
    pub fn with_dataset(mut dataset: Dataset) -> StorageResult<Self> {
        dataset.normalize()?;
        Ok(Self {
            dataset: RwLock::new(dataset),
        })
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryBackend {
    fn load(&self) -> StorageResult<Dataset> {
        let dataset = self.dataset.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(dataset.clone())
    }

    fn save(&self, dataset: &Dataset) -> StorageResult<()> {
        let mut stored = self.dataset.write().map_err(|_| StorageError::LockPoisoned)?;
        *stored = dataset.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
