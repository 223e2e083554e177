//! # Session Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StorageError              SessionError                                 │
//! │  ────────────              ────────────                                 │
//! │  Io                        NotLoggedIn                                  │
//! │  Serialization             Forbidden                                    │
//! │  Unavailable               InvalidConfig                                │
//! │                                                                         │
//! │  StorageError never leaves SessionStore: a failing backend is logged    │
//! │  and the store continues in memory.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use mandi_core::Role;
use thiserror::Error;

/// Key-value backend failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The session blob could not be encoded or decoded.
    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend cannot be used at all (no data directory, poisoned lock, bad key).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Session access errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A protected page was opened without a session.
    #[error("Not logged in")]
    NotLoggedIn,

    /// Logged in, but as the other role.
    #[error("This page requires the {required} role (logged in as {actual})")]
    Forbidden { required: Role, actual: Role },

    /// Bad session configuration value.
    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
