//! Session storage configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::SessionError;
use crate::session::{SessionStore, SESSION_KEY};
use crate::storage::{is_valid_key, FileStore, KeyValueStore, MemoryStore};

/// Which backend holds the session slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Process-local; the session ends with the process.
    Memory,
    /// A file under the data directory.
    #[default]
    File,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Memory => write!(f, "memory"),
            StorageKind::File => write!(f, "file"),
        }
    }
}

impl FromStr for StorageKind {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageKind::Memory),
            "file" | "disk" => Ok(StorageKind::File),
            other => Err(SessionError::InvalidConfig(format!(
                "Unknown session storage: '{}'. Valid options: memory, file",
                other
            ))),
        }
    }
}

/// Session settings (the `[session]` table of the host config).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Storage backend.
    /// Default: file
    #[serde(default)]
    pub storage: StorageKind,

    /// Directory for the file backend.
    /// Default: platform data directory
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Slot key.
    /// Default: "smartmandi_auth"
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_key() -> String {
    SESSION_KEY.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            storage: StorageKind::default(),
            dir: None,
            key: default_key(),
        }
    }
}

impl SessionConfig {
    /// In-memory settings (for tests and demos).
    pub fn memory() -> Self {
        SessionConfig {
            storage: StorageKind::Memory,
            ..Self::default()
        }
    }

    /// Keys become file names, so only `[A-Za-z0-9_-]` is allowed.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.key.is_empty() {
            return Err(SessionError::InvalidConfig("key must not be empty".into()));
        }
        if !is_valid_key(&self.key) {
            return Err(SessionError::InvalidConfig(format!(
                "key '{}' may only contain letters, digits, '_' and '-'",
                self.key
            )));
        }
        Ok(())
    }

    /// Builds the configured backend.
    ///
    /// A file backend with no usable directory falls back to memory.
    pub fn build_storage(&self) -> Arc<dyn KeyValueStore> {
        match self.storage {
            StorageKind::Memory => Arc::new(MemoryStore::new()),
            StorageKind::File => {
                let store = match &self.dir {
                    Some(dir) => Ok(FileStore::new(dir)),
                    None => FileStore::open_default(),
                };
                match store {
                    Ok(store) => {
                        info!(dir = ?store.dir(), "Using file session storage");
                        Arc::new(store)
                    }
                    Err(e) => {
                        warn!(error = %e, "File session storage unavailable, using memory");
                        Arc::new(MemoryStore::new())
                    }
                }
            }
        }
    }

    /// Builds a session store over the configured backend.
    pub fn open(&self) -> SessionStore {
        SessionStore::with_key(self.build_storage(), self.key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandi_core::Role;

    #[test]
    fn test_storage_kind_parse() {
        assert_eq!("memory".parse::<StorageKind>().unwrap(), StorageKind::Memory);
        assert_eq!(" FILE ".parse::<StorageKind>().unwrap(), StorageKind::File);
        assert!("cloud".parse::<StorageKind>().is_err());
        assert_eq!(StorageKind::File.to_string(), "file");
    }

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.storage, StorageKind::File);
        assert_eq!(config.key, "smartmandi_auth");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_key_is_invalid() {
        let config = SessionConfig {
            key: "  ".into(),
            ..SessionConfig::memory()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_key_must_be_a_plain_name() {
        for key in ["my.slot", "../auth", "a b", "slot/1"] {
            let config = SessionConfig {
                key: key.into(),
                ..SessionConfig::memory()
            };
            assert!(
                matches!(config.validate(), Err(SessionError::InvalidConfig(_))),
                "{key} should be rejected"
            );
        }

        let config = SessionConfig {
            key: "Mandi_auth-2".into(),
            ..SessionConfig::memory()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_open_file_store_in_dir() {
        let dir = std::env::temp_dir().join(format!("smartmandi-config-{}", uuid::Uuid::new_v4()));
        let config = SessionConfig {
            storage: StorageKind::File,
            dir: Some(dir.clone()),
            key: "custom_slot".into(),
        };

        let mut session = config.open();
        session.login(Role::Farmer, None);
        assert!(dir.join("custom_slot.json").exists());

        assert!(config.open().is_logged_in());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_memory_stores_do_not_share() {
        let config = SessionConfig::memory();
        let mut first = config.open();
        first.login(Role::Vendor, None);

        assert!(!config.open().is_logged_in());
    }
}
