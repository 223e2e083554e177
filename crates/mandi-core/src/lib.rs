//! # mandi-core: Pure Domain Logic for SmartMandi
//!
//! Types and rules shared by every other crate in the workspace. Nothing in
//! here performs I/O, sleeps or touches storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       SmartMandi Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Frontend (farmer / vendor pages)               │   │
//! │  └──────────────┬─────────────────────────────────┬────────────────┘   │
//! │                 │                                 │                     │
//! │  ┌──────────────▼──────────────┐   ┌──────────────▼──────────────┐     │
//! │  │   mandi-mock (mock API)     │   │  mandi-session (auth state) │     │
//! │  └──────────────┬──────────────┘   └──────────────┬──────────────┘     │
//! │                 │                                 │                     │
//! │  ┌──────────────▼─────────────────────────────────▼──────────────┐     │
//! │  │               ★ mandi-core (THIS CRATE) ★                     │     │
//! │  │   types • money • validation • error                          │     │
//! │  │   NO I/O • NO TIMERS • NO STORAGE                              │     │
//! │  └───────────────────────────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, orders, User, Role, reports)
//! - [`money`] - Rupee amounts in integer paise with Indian digit grouping
//! - [`error`] - Domain error types
//! - [`validation`] - Listing form rules

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Listing ids are assigned above this floor, so the first listing is 301.
pub const PRODUCT_ID_FLOOR: i64 = 300;

/// Number of daily points in a price analysis series.
pub const PRICE_SERIES_DAYS: u32 = 30;
