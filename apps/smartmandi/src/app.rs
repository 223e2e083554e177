//! # App Handle
//!
//! One mock API and one session store, wired for page code.
//!
//! ## Sign-in Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sign_in(role, email, password)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  api.auth().login(..) ── InvalidCredentials ──► AppError::Api           │
//! │       │ Ok(LoginResponse { user, .. })                                  │
//! │       ▼                                                                 │
//! │  session.login_with(role, UserInfo::from(&user))  (persisted)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::info;

use mandi_core::{FarmerOrderSummary, Role, UserInfo, VendorOrderSummary};
use mandi_mock::MockApi;
use mandi_session::{SessionError, SessionStore};

use crate::config::AppConfig;
use crate::error::AppResult;

/// Dashboard figures for whoever is logged in.
#[derive(Debug, Clone, PartialEq)]
pub enum Overview {
    Farmer {
        user: UserInfo,
        orders: FarmerOrderSummary,
    },
    Vendor {
        user: UserInfo,
        orders: VendorOrderSummary,
    },
}

/// The host's two services.
#[derive(Debug)]
pub struct App {
    api: MockApi,
    session: SessionStore,
}

impl App {
    /// Builds both services from configuration, restoring any saved session.
    pub fn new(config: &AppConfig) -> Self {
        Self::from_parts(MockApi::new(config.api.mock_config()), config.session.open())
    }

    pub fn from_parts(api: MockApi, session: SessionStore) -> Self {
        App { api, session }
    }

    pub fn api(&self) -> &MockApi {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Checks credentials against the mock API and starts a session.
    pub async fn sign_in(
        &mut self,
        role: Role,
        email: Option<&str>,
        password: &str,
    ) -> AppResult<UserInfo> {
        let response = self.api.auth().login(role, email, password).await?;
        let user = UserInfo::from(&response.user);
        self.session.login_with(role, user.clone());
        Ok(user)
    }

    pub fn sign_out(&mut self) {
        self.session.logout();
    }

    /// Dashboard figures for the current session.
    pub async fn overview(&self) -> AppResult<Overview> {
        match self.session.role() {
            Some(Role::Farmer) => {
                let user = self.session.require_role(Role::Farmer)?.clone();
                let orders = self.api.farmer_orders().summary().await;
                Ok(Overview::Farmer { user, orders })
            }
            Some(Role::Vendor) => {
                let user = self.session.require_role(Role::Vendor)?.clone();
                let orders = self.api.vendor_orders().summary().await;
                Ok(Overview::Vendor { user, orders })
            }
            None => Err(SessionError::NotLoggedIn.into()),
        }
    }

    /// Logs a one-line status for the current session.
    pub async fn log_status(&self) {
        let products = self.api.products().count().await;
        match self.overview().await {
            Ok(Overview::Farmer { user, orders }) => info!(
                user_id = %user.id,
                products,
                new_orders = orders.new_orders,
                pending_delivery = orders.pending_delivery,
                payments_due = %orders.payments_due,
                "Farmer session active"
            ),
            Ok(Overview::Vendor { user, orders }) => info!(
                user_id = %user.id,
                products,
                awaiting_pickup = orders.awaiting_pickup,
                in_transit = orders.in_transit,
                delivered = orders.delivered,
                "Vendor session active"
            ),
            Err(_) => info!(products, "No active session"),
        }
    }
}
