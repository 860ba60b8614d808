//! # Persistence Backends
//!
//! A backend stores the whole dataset and hands it back wholesale:
//! `load` returns every collection, `save` replaces every collection.
//! The repository layer decides when to call them, so the same listing
//! and CRUD code runs unchanged over an in-process dataset or a JSON file.
//!
//! Backends do no locking of their own across a load/save pair; callers
//! that read-modify-write must serialize those sequences themselves.

mod dataset;
mod errors;
mod json_file;
mod memory;

pub use dataset::Dataset;
pub(crate) use dataset::successor;
pub use errors::{StorageError, StorageResult};
pub use json_file::{read_dataset, JsonFileBackend};
pub use memory::MemoryBackend;

/// Capability interface over a backing collection store
pub trait Backend: Send + Sync {
    /// Read the current dataset
    fn load(&self) -> StorageResult<Dataset>;

    /// Replace the stored dataset
    fn save(&self, dataset: &Dataset) -> StorageResult<()>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}
