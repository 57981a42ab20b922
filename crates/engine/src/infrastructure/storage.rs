//! Key-value storage adapters
//!
//! `MemoryStorage` keeps documents for the lifetime of the process.
//! `FileStorage` mirrors the same map into a single JSON file so sessions and
//! custom questions survive restarts.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use directories::ProjectDirs;

use crate::infrastructure::ports::{StorageError, StoragePort};

/// Storage file name inside the platform config directory
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// In-process storage for tests and ephemeral play
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoragePort for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.entries.read().map_err(StorageError::lock)?;
        Ok(guard.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.entries.write().map_err(StorageError::lock)?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self.entries.write().map_err(StorageError::lock)?;
        guard.remove(key);
        Ok(())
    }
}

/// File-backed storage
///
/// Stores key-value pairs in a JSON file, by default at:
/// - Linux: ~/.config/connection-cards/storage.json
/// - macOS: ~/Library/Application Support/app.connection-cards.connection-cards/storage.json
/// - Windows: C:\Users\<User>\AppData\Roaming\connection-cards\connection-cards\config\storage.json
#[derive(Debug)]
pub struct FileStorage {
    /// Path to the storage file
    storage_path: PathBuf,
    /// In-memory cache of stored values
    cache: RwLock<HashMap<String, String>>,
}

impl FileStorage {
    /// Platform config location, falling back to the working directory
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("app", "connection-cards", "connection-cards") {
            dirs.config_dir().join(STORAGE_FILE_NAME)
        } else {
            PathBuf::from("connection_cards_storage.json")
        }
    }

    /// Open the storage file at `path`.
    ///
    /// A missing file starts empty. An unreadable or corrupt file is logged
    /// and also starts empty; it is overwritten on the next save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let storage_path = path.into();

        let cache = if storage_path.exists() {
            match fs::read_to_string(&storage_path) {
                Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                    Ok(map) => map,
                    Err(e) => {
                        tracing::warn!(path = %storage_path.display(), error = %e, "Failed to parse storage file");
                        HashMap::new()
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %storage_path.display(), error = %e, "Failed to read storage file");
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        tracing::debug!(path = %storage_path.display(), keys = cache.len(), "File storage initialized");

        Self {
            storage_path,
            cache: RwLock::new(cache),
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Write the whole cache to disk
    fn persist(&self, cache: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io("create_dir", e))?;
            }
        }

        let data = serde_json::to_string_pretty(cache)?;
        fs::write(&self.storage_path, data).map_err(|e| StorageError::io("write", e))
    }
}

impl StoragePort for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.cache.read().map_err(StorageError::lock)?;
        Ok(guard.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.cache.write().map_err(StorageError::lock)?;
        guard.insert(key.to_string(), value.to_string());
        self.persist(&guard)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self.cache.write().map_err(StorageError::lock)?;
        if guard.remove(key).is_some() {
            self.persist(&guard)?;
        }
        Ok(())
    }
}
