//! JSON file storage backend.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{KeyValueStore, Result, StoreError};

/// File-backed key-value store.
///
/// The whole store is one JSON object of string keys to string values.
/// Every `get` re-reads the file and every `set` rewrites it, so separate
/// store instances (or processes) pointed at the same file observe each
/// other's writes, last writer wins.
pub struct JsonFileStore {
    /// Path of the backing JSON file.
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file.
    ///
    /// Creates the parent directory if needed; the file itself is created
    /// lazily on the first `set`.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self { path })
    }

    /// Open a store at the default data directory.
    pub fn open_default() -> Result<Self> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| StoreError::PathError("Could not find data directory".into()))?
            .join("tokenledger");
        Self::new(data_dir.join("ledger.json"))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.read_map()?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());

        let raw = serde_json::to_string_pretty(&map)?;
        fs::write(&self.path, raw)?;

        debug!(key, path = %self.path.display(), "wrote ledger entry");
        Ok(())
    }
}
