//! # Error Types
//!
//! Domain-specific error types for mandi-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mandi-core errors (this file)                                         │
//! │  ├── CoreError        - Parse failures for domain values               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  mandi-mock errors (separate crate)                                    │
//! │  └── ApiError         - Credentials / not found / bad transition       │
//! │                                                                         │
//! │  mandi-session errors (separate crate)                                 │
//! │  ├── StorageError     - Durable slot failures (never escape the store) │
//! │  └── SessionError     - Role-gated access refused                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while interpreting domain values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A role string was neither "Farmer" nor "Vendor".
    #[error("Unknown role: '{0}'. Valid options: Farmer, Vendor")]
    UnknownRole(String),

    /// A currency amount could not be parsed.
    ///
    /// ## When This Occurs
    /// - Order totals seeded with a malformed string (e.g. "₹1,2x,000")
    /// - More than two decimal places ("₹10.505")
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidAmount error.
    pub fn invalid_amount(input: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidAmount {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Produced by the helpers in [`crate::validation`]. The mock API never
/// raises these itself; callers validate before submitting.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not a finite number.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
