//! # mandi-session: Session Store for SmartMandi
//!
//! Client-side authentication state: whether someone is logged in, their
//! role, and their identity. The state survives restarts through a
//! [`KeyValueStore`] slot.
//!
//! ## Module Organization
//!
//! - [`session`] - The [`SessionStore`] state machine
//! - [`storage`] - Key-value backends (memory, file)
//! - [`config`] - Backend selection
//! - [`error`] - Storage and session errors
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mandi_session::SessionConfig;
//!
//! let mut session = SessionConfig::default().open();
//! if !session.is_logged_in() {
//!     session.login(Role::Farmer, Some("farmer@example.com"));
//! }
//! let me = session.require_role(Role::Farmer)?;
//! ```

pub mod config;
pub mod error;
pub mod session;
pub mod storage;

pub use config::{SessionConfig, StorageKind};
pub use error::{SessionError, SessionResult, StorageError, StorageResult};
pub use session::{default_identity, PersistedSession, SessionState, SessionStore, SESSION_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
