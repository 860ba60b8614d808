//! JSON file backend.
//!
//! The whole file is read on every load and rewritten on every save.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::dataset::Dataset;
use super::errors::{StorageError, StorageResult};
use super::Backend;

/// Dataset stored as a single pretty-printed JSON document
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Open an existing data file, failing if it is missing or unreadable.
    ///
    /// A file that still holds clear-text user passwords is rewritten at
    /// once with their hashes.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let backend = Self { path: path.into() };
        let (dataset, clear_text) = read_file(&backend.path)?;
        if clear_text {
            backend.save(&dataset)?;
        }
        Ok(backend)
    }

    /// Create a new data file holding an empty dataset.
    pub fn create(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let backend = Self { path: path.into() };
        if backend.path.exists() {
            return Err(StorageError::AlreadyExists(
                backend.path.display().to_string(),
            ));
        }
        if let Some(parent) = backend.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        backend.save(&Dataset::new())?;
        Ok(backend)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read and decode a data file without keeping a backend around.
pub fn read_dataset(path: &Path) -> StorageResult<Dataset> {
    read_file(path).map(|(dataset, _)| dataset)
}

/// Decode a data file, also reporting whether any user carried a
/// clear-text password that was hashed while loading.
fn read_file(path: &Path) -> StorageResult<(Dataset, bool)> {
    let corrupt = |e: serde_json::Error| StorageError::corrupt(path.display().to_string(), e);

    let content = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    let document: Value = serde_json::from_str(&content).map_err(corrupt)?;
    let clear_text = has_clear_text_password(&document);

    let mut dataset: Dataset = serde_json::from_value(document).map_err(corrupt)?;
    dataset.normalize()?;
    Ok((dataset, clear_text))
}

fn has_clear_text_password(document: &Value) -> bool {
    document
        .get("users")
        .and_then(Value::as_array)
        .map_or(false, |users| {
            users.iter().any(|user| user.get("password").is_some())
        })
}

impl Backend for JsonFileBackend {
    fn load(&self) -> StorageResult<Dataset> {
        read_dataset(&self.path)
    }

    fn save(&self, dataset: &Dataset) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(dataset)
            .map_err(|e| StorageError::corrupt(self.path.display().to_string(), e))?;
        fs::write(&self.path, content).map_err(|e| StorageError::io(&self.path, e))
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
