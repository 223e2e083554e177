//! # Host Error Type
//!
//! Everything that can stop the host, in one enum.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  smartmandi.toml unreadable ──► AppError::ConfigIo                      │
//! │  smartmandi.toml malformed  ──► AppError::ConfigParse                   │
//! │  value out of range         ──► AppError::InvalidConfig                 │
//! │  auth().login failed        ──► AppError::Api(ApiError)                 │
//! │  require_role failed        ──► AppError::Session(SessionError)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use mandi_mock::ApiError;
use mandi_session::SessionError;
use thiserror::Error;

/// Host-level error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read config: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AppError {
    /// Short machine-readable code for log fields.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ConfigIo(_) | AppError::ConfigParse(_) | AppError::InvalidConfig(_) => {
                "CONFIG_ERROR"
            }
            AppError::Api(ApiError::InvalidCredentials) => "INVALID_CREDENTIALS",
            AppError::Api(ApiError::NotFound { .. }) => "NOT_FOUND",
            AppError::Api(ApiError::InvalidTransition { .. }) => "BUSINESS_LOGIC",
            AppError::Session(SessionError::NotLoggedIn) => "NOT_LOGGED_IN",
            AppError::Session(SessionError::Forbidden { .. }) => "FORBIDDEN",
            AppError::Session(SessionError::InvalidConfig(_)) => "CONFIG_ERROR",
        }
    }
}

/// Result type for host operations.
pub type AppResult<T> = Result<T, AppError>;
