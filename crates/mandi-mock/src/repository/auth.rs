//! Login against the static user table.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use mandi_core::{Role, User};

use crate::config::{Delay, MockConfig};
use crate::error::{ApiError, ApiResult};

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque token, `mock-token-<uuid>`.
    pub token: String,
    pub user: User,
}

/// Repository for credential checks.
#[derive(Debug, Clone)]
pub struct AuthRepository {
    users: Arc<Vec<User>>,
    config: MockConfig,
}

impl AuthRepository {
    pub(crate) fn new(users: Arc<Vec<User>>, config: MockConfig) -> Self {
        AuthRepository { users, config }
    }

    /// Logs a user in by role and (optionally) email.
    ///
    /// `None` or an empty email matches any user of the role. The password
    /// is accepted but never checked.
    ///
    /// ## Returns
    /// * `Ok(LoginResponse)` - First user with matching role and email
    /// * `Err(ApiError::InvalidCredentials)` - No such user
    pub async fn login(
        &self,
        role: Role,
        email: Option<&str>,
        _password: &str,
    ) -> ApiResult<LoginResponse> {
        self.config.simulate(Delay::Login).await;

        let email = email.filter(|e| !e.is_empty());
        debug!(%role, email = ?email, "Login attempt");

        let user = self
            .users
            .iter()
            .find(|u| u.role == role && email.map_or(true, |e| u.email == e))
            .cloned();

        match user {
            Some(user) => {
                info!(%role, user_id = %user.id, "User logged in");
                Ok(LoginResponse {
                    token: format!("mock-token-{}", Uuid::new_v4()),
                    user,
                })
            }
            None => {
                warn!(%role, email = ?email, "Login rejected");
                Err(ApiError::InvalidCredentials)
            }
        }
    }
}
