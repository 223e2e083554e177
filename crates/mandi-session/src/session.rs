//! # Session Store
//!
//! Who is logged in, as which role, persisted across restarts.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │              login(role, email) / login_with(role, user)                │
//! │   ┌───────────┐ ──────────────────────────────► ┌──────────────────┐    │
//! │   │ LoggedOut │                                 │ LoggedIn         │    │
//! │   │           │ ◄────────────────────────────── │ { role, user }   │    │
//! │   └───────────┘             logout()            └──────────────────┘    │
//! │                                                   login again replaces  │
//! │                                                                         │
//! │  After every transition:                                                │
//! │    LoggedIn  → set("smartmandi_auth", {isLoggedIn, userRole, userInfo}) │
//! │    LoggedOut → remove("smartmandi_auth")                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Degraded Mode
//! The first storage failure (read at startup or any later write) is logged
//! at `warn` and the backend is dropped. From then on the store keeps state
//! in memory only; callers never see a storage error.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use mandi_core::{Role, UserInfo};

use crate::error::{SessionError, SessionResult, StorageError};
use crate::storage::{KeyValueStore, MemoryStore};

/// Storage key of the session slot.
pub const SESSION_KEY: &str = "smartmandi_auth";

/// Authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn { role: Role, user: UserInfo },
}

/// The persisted (and UI-facing) shape of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub is_logged_in: bool,
    pub user_role: Option<Role>,
    pub user_info: Option<UserInfo>,
}

impl From<&SessionState> for PersistedSession {
    fn from(state: &SessionState) -> Self {
        match state {
            SessionState::LoggedOut => PersistedSession {
                is_logged_in: false,
                user_role: None,
                user_info: None,
            },
            SessionState::LoggedIn { role, user } => PersistedSession {
                is_logged_in: true,
                user_role: Some(*role),
                user_info: Some(user.clone()),
            },
        }
    }
}

impl PersistedSession {
    /// Converts back to a state; `None` when the fields disagree.
    fn into_state(self) -> Option<SessionState> {
        match (self.is_logged_in, self.user_role, self.user_info) {
            (true, Some(role), Some(user)) => Some(SessionState::LoggedIn { role, user }),
            (false, None, None) => Some(SessionState::LoggedOut),
            _ => None,
        }
    }
}

/// Identity used when logging in by role alone.
pub fn default_identity(role: Role) -> UserInfo {
    match role {
        Role::Farmer => UserInfo {
            id: "FM401".to_string(),
            name: "Sanket Hiremath".to_string(),
            email: "farmer@example.com".to_string(),
        },
        Role::Vendor => UserInfo {
            id: "VEN105".to_string(),
            name: "Vishw Vora".to_string(),
            email: "vendor@example.com".to_string(),
        },
    }
}

/// Owns the session state and its persisted slot.
///
/// ## Example
/// ```rust
/// use mandi_core::Role;
/// use mandi_session::{MemoryStore, SessionStore};
/// use std::sync::Arc;
///
/// let storage = MemoryStore::new();
/// let mut session = SessionStore::new(Arc::new(storage.clone()));
/// session.login(Role::Farmer, None);
///
/// // A new store over the same storage picks the session back up.
/// let restored = SessionStore::new(Arc::new(storage));
/// assert_eq!(restored.role(), Some(Role::Farmer));
/// ```
#[derive(Debug)]
pub struct SessionStore {
    state: SessionState,
    /// `None` once the backend has failed.
    storage: Option<Arc<dyn KeyValueStore>>,
    key: String,
}

impl SessionStore {
    /// Creates a store over `storage` using the standard slot key.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(storage, SESSION_KEY)
    }

    /// Creates a store over `storage` using a custom slot key.
    ///
    /// The slot is read immediately; a valid blob restores the session.
    pub fn with_key(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let mut store = SessionStore {
            state: SessionState::LoggedOut,
            storage: Some(storage),
            key: key.into(),
        };
        store.rehydrate();
        store
    }

    /// Creates a store with a private in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    fn rehydrate(&mut self) {
        let Some(storage) = self.storage.clone() else {
            return;
        };

        let raw = match storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No persisted session");
                return;
            }
            Err(e) => {
                self.degrade(&e);
                return;
            }
        };

        match serde_json::from_str::<PersistedSession>(&raw) {
            Ok(persisted) => match persisted.into_state() {
                Some(state) => {
                    info!(logged_in = matches!(state, SessionState::LoggedIn { .. }), "Session restored");
                    self.state = state;
                }
                None => warn!(key = %self.key, "Inconsistent session blob, starting logged out"),
            },
            Err(e) => warn!(key = %self.key, error = %e, "Unreadable session blob, starting logged out"),
        }
    }

    fn degrade(&mut self, error: &StorageError) {
        warn!(key = %self.key, error = %error, "Session storage failed, continuing in memory only");
        self.storage = None;
    }

    fn persist(&mut self) {
        let Some(storage) = self.storage.clone() else {
            return;
        };

        let result = match &self.state {
            SessionState::LoggedOut => storage.remove(&self.key),
            state => serde_json::to_string(&PersistedSession::from(state))
                .map_err(StorageError::from)
                .and_then(|blob| storage.set(&self.key, &blob)),
        };

        if let Err(e) = result {
            self.degrade(&e);
        }
    }

    /// Logs in as `role` with the fixed identity for that role.
    ///
    /// A non-empty `email` replaces the identity's email.
    pub fn login(&mut self, role: Role, email: Option<&str>) -> UserInfo {
        let mut user = default_identity(role);
        if let Some(email) = email.filter(|e| !e.is_empty()) {
            user.email = email.to_string();
        }
        self.login_with(role, user.clone());
        user
    }

    /// Logs in as `role` with a caller-supplied identity.
    pub fn login_with(&mut self, role: Role, user: UserInfo) {
        info!(%role, user_id = %user.id, "Session started");
        self.state = SessionState::LoggedIn { role, user };
        self.persist();
    }

    /// Ends the session and clears the persisted slot.
    pub fn logout(&mut self) {
        if let SessionState::LoggedIn { role, user } = &self.state {
            info!(%role, user_id = %user.id, "Session ended");
        }
        self.state = SessionState::LoggedOut;
        self.persist();
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn { .. })
    }

    pub fn role(&self) -> Option<Role> {
        match &self.state {
            SessionState::LoggedIn { role, .. } => Some(*role),
            SessionState::LoggedOut => None,
        }
    }

    pub fn user_info(&self) -> Option<&UserInfo> {
        match &self.state {
            SessionState::LoggedIn { user, .. } => Some(user),
            SessionState::LoggedOut => None,
        }
    }

    /// The `{isLoggedIn, userRole, userInfo}` record.
    pub fn snapshot(&self) -> PersistedSession {
        PersistedSession::from(&self.state)
    }

    /// Guard for role-protected pages.
    ///
    /// ## Returns
    /// * `Ok(&UserInfo)` - Logged in with `role`
    /// * `Err(SessionError::NotLoggedIn)` - No session
    /// * `Err(SessionError::Forbidden)` - Logged in with the other role
    pub fn require_role(&self, role: Role) -> SessionResult<&UserInfo> {
        match &self.state {
            SessionState::LoggedOut => Err(SessionError::NotLoggedIn),
            SessionState::LoggedIn { role: actual, user } if *actual == role => Ok(user),
            SessionState::LoggedIn { role: actual, .. } => Err(SessionError::Forbidden {
                required: role,
                actual: *actual,
            }),
        }
    }

    /// True once storage has failed and the store runs in memory only.
    pub fn is_degraded(&self) -> bool {
        self.storage.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageResult;
    use crate::storage::FileStore;

    /// Backend that fails every call.
    #[derive(Debug)]
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Unavailable("disk gone".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("disk gone".into()))
        }
        fn remove(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("disk gone".into()))
        }
    }

    /// Backend whose reads work but whose writes fail.
    #[derive(Debug, Default)]
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.get(key)
        }
        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
        fn remove(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_starts_logged_out() {
        let session = SessionStore::in_memory();

        assert_eq!(session.state(), &SessionState::LoggedOut);
        assert!(!session.is_logged_in());
        assert_eq!(session.role(), None);
        assert_eq!(session.user_info(), None);
        assert!(!session.is_degraded());
    }

    #[test]
    fn test_login_uses_role_identity() {
        let mut session = SessionStore::in_memory();

        let user = session.login(Role::Vendor, None);

        assert_eq!(user.id, "VEN105");
        assert_eq!(user.name, "Vishw Vora");
        assert_eq!(user.email, "vendor@example.com");
        assert_eq!(session.role(), Some(Role::Vendor));
    }

    #[test]
    fn test_login_email_override() {
        let mut session = SessionStore::in_memory();

        session.login(Role::Farmer, Some("sanket@farm.in"));
        assert_eq!(session.user_info().unwrap().email, "sanket@farm.in");
        assert_eq!(session.user_info().unwrap().id, "FM401");

        session.login(Role::Farmer, Some(""));
        assert_eq!(session.user_info().unwrap().email, "farmer@example.com");
    }

    #[test]
    fn test_login_email_override_is_stored_as_given() {
        let mut session = SessionStore::in_memory();

        session.login(Role::Vendor, Some(" buyer@mandi.in "));
        assert_eq!(session.user_info().unwrap().email, " buyer@mandi.in ");
    }

    #[test]
    fn test_session_survives_restart() {
        let storage = MemoryStore::new();

        let mut first = SessionStore::new(Arc::new(storage.clone()));
        first.login(Role::Farmer, None);
        let expected = first.snapshot();
        drop(first);

        let second = SessionStore::new(Arc::new(storage));
        assert_eq!(second.snapshot(), expected);
        assert_eq!(second.user_info().unwrap().id, "FM401");
    }

    #[test]
    fn test_logout_clears_slot() {
        let storage = MemoryStore::new();
        let mut session = SessionStore::new(Arc::new(storage.clone()));

        session.login(Role::Vendor, None);
        assert!(storage.get(SESSION_KEY).unwrap().is_some());

        session.logout();
        assert_eq!(storage.get(SESSION_KEY).unwrap(), None);
        assert_eq!(session.state(), &SessionState::LoggedOut);

        let restarted = SessionStore::new(Arc::new(storage));
        assert!(!restarted.is_logged_in());
    }

    #[test]
    fn test_persisted_blob_shape() {
        let storage = MemoryStore::new();
        let mut session = SessionStore::new(Arc::new(storage.clone()));
        session.login(Role::Farmer, None);

        let raw = storage.get(SESSION_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(json["isLoggedIn"], true);
        assert_eq!(json["userRole"], "Farmer");
        assert_eq!(json["userInfo"]["id"], "FM401");
        assert_eq!(json["userInfo"]["name"], "Sanket Hiremath");
    }

    #[test]
    fn test_corrupt_blob_starts_logged_out() {
        let storage = MemoryStore::new();
        storage.set(SESSION_KEY, "{not json").unwrap();

        let session = SessionStore::new(Arc::new(storage));

        assert!(!session.is_logged_in());
        assert!(!session.is_degraded());
    }

    #[test]
    fn test_inconsistent_blob_starts_logged_out() {
        let storage = MemoryStore::new();
        storage
            .set(SESSION_KEY, r#"{"isLoggedIn":true,"userRole":"Farmer","userInfo":null}"#)
            .unwrap();

        let session = SessionStore::new(Arc::new(storage));

        assert_eq!(session.state(), &SessionState::LoggedOut);
    }

    #[test]
    fn test_legacy_logged_out_blob() {
        let storage = MemoryStore::new();
        storage
            .set(SESSION_KEY, r#"{"isLoggedIn":false,"userRole":null,"userInfo":null}"#)
            .unwrap();

        assert!(!SessionStore::new(Arc::new(storage)).is_logged_in());
    }

    #[test]
    fn test_broken_storage_degrades_silently() {
        let mut session = SessionStore::new(Arc::new(BrokenStore));
        assert!(session.is_degraded());

        session.login(Role::Vendor, None);
        assert_eq!(session.role(), Some(Role::Vendor));

        session.logout();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_failed_write_degrades_but_keeps_state() {
        let mut session = SessionStore::new(Arc::new(ReadOnlyStore::default()));
        assert!(!session.is_degraded());

        session.login(Role::Farmer, None);

        assert!(session.is_degraded());
        assert_eq!(session.role(), Some(Role::Farmer));
    }

    #[test]
    fn test_require_role() {
        let mut session = SessionStore::in_memory();
        assert_eq!(
            session.require_role(Role::Farmer),
            Err(SessionError::NotLoggedIn)
        );

        session.login(Role::Farmer, None);
        assert_eq!(session.require_role(Role::Farmer).unwrap().id, "FM401");
        assert_eq!(
            session.require_role(Role::Vendor),
            Err(SessionError::Forbidden {
                required: Role::Vendor,
                actual: Role::Farmer,
            })
        );
    }

    #[test]
    fn test_login_with_custom_user() {
        let mut session = SessionStore::in_memory();
        let user = UserInfo {
            id: "VEN999".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
        };

        session.login_with(Role::Vendor, user.clone());

        assert_eq!(session.user_info(), Some(&user));
    }

    #[test]
    fn test_file_backed_restart() {
        let dir = std::env::temp_dir().join(format!("smartmandi-session-{}", uuid::Uuid::new_v4()));

        let mut first = SessionStore::new(Arc::new(FileStore::new(&dir)));
        first.login(Role::Vendor, Some("buyer@example.com"));

        let second = SessionStore::new(Arc::new(FileStore::new(&dir)));
        assert_eq!(second.user_info().unwrap().email, "buyer@example.com");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
