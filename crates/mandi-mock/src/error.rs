//! # Mock API Error Types
//!
//! Error types for mock API operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Repository operation (login / update / accept ...)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (this module) ← The only failures the mock API defines       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller (page code) decides what to show; nothing is retried here      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Read operations never fail: a missing record is `None`, an unmatched
//! search is an empty list.

use thiserror::Error;

/// Mock API operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No user matched the role/email pair on login.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Entity not found for a mutation.
    ///
    /// ## When This Occurs
    /// - `products().update(..)` with an id that was never assigned
    /// - Order status change on an unknown order id
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The order is not in a state that allows the requested change.
    ///
    /// ## When This Occurs
    /// - Accepting an order that is already delivered
    /// - Rejecting an order that was already accepted
    #[error("{entity} {id} is '{from}', cannot move to '{to}'")]
    InvalidTransition {
        entity: String,
        id: String,
        from: String,
        to: String,
    },
}

impl ApiError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Returns true for [`ApiError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// Result type for mock API operations.
pub type ApiResult<T> = Result<T, ApiError>;
