//! # Key-Value Storage
//!
//! Durable string slots for the session blob.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MemoryStore   HashMap behind Arc<Mutex<..>>. Clones share the map, so  │
//! │                a second SessionStore over a clone sees what the first   │
//! │                one wrote (a "restart" within one process).              │
//! │                                                                         │
//! │  FileStore     <dir>/<key>.json, one file per key.                      │
//! │                Default dir: platform data dir (directories crate)       │
//! │                  Linux  ~/.local/share/smartmandi                       │
//! │                  macOS  ~/Library/Application Support/com.smartmandi... │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::error::{StorageError, StorageResult};

/// A durable map of string keys to string values.
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Returns the value under `key`, or `None` when the slot is empty.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Empties the slot. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Whether `key` is usable by every backend: non-empty `[A-Za-z0-9_-]`.
pub(crate) fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

// =============================================================================
// MemoryStore
// =============================================================================

/// Process-local store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_slots<T>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> T) -> StorageResult<T> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".into()))?;
        Ok(f(&mut slots))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.with_slots(|slots| slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.with_slots(|slots| {
            slots.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.with_slots(|slots| {
            slots.remove(key);
        })
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// One JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    /// Creates a store in the platform data directory.
    pub fn open_default() -> StorageResult<Self> {
        Self::default_dir()
            .map(Self::new)
            .ok_or_else(|| StorageError::Unavailable("no home directory for session data".into()))
    }

    /// Platform data directory for SmartMandi, if the OS reports one.
    pub fn default_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "smartmandi", "smartmandi")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        if !is_valid_key(key) {
            return Err(StorageError::Unavailable(format!("invalid storage key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, value)?;
        debug!(?path, "Wrote storage slot");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> FileStore {
        FileStore::new(std::env::temp_dir().join(format!("smartmandi-test-{}", uuid::Uuid::new_v4())))
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();

        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        store.remove("k").unwrap();
    }

    #[test]
    fn test_memory_store_clones_share_slots() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("k", "v").unwrap();

        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let store = temp_store();

        assert_eq!(store.get("smartmandi_auth").unwrap(), None);

        store.set("smartmandi_auth", "{\"isLoggedIn\":false}").unwrap();
        assert!(store.dir().join("smartmandi_auth.json").exists());
        assert_eq!(
            store.get("smartmandi_auth").unwrap().as_deref(),
            Some("{\"isLoggedIn\":false}")
        );

        store.remove("smartmandi_auth").unwrap();
        assert_eq!(store.get("smartmandi_auth").unwrap(), None);
        store.remove("smartmandi_auth").unwrap();

        fs::remove_dir_all(store.dir()).unwrap();
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let store = temp_store();
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(store.get("").is_err());
    }
}
