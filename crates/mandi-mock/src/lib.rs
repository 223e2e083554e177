//! # mandi-mock: Mock Data Service for SmartMandi
//!
//! In-process stand-in for the marketplace backend. Every operation is async
//! and resolves after a simulated network delay.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SmartMandi Data Flow                               │
//! │                                                                         │
//! │  Page code (farmer dashboard, vendor browse, ...)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    mandi-mock (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   MockApi     │    │  Repositories  │    │  Seed data   │  │   │
//! │  │   │   (api.rs)    │    │ (repository/)  │    │  (seed.rs)   │  │   │
//! │  │   │               │    │                │    │              │  │   │
//! │  │   │ collections   │◄───│ Product        │    │ 301..303     │  │   │
//! │  │   │ MockConfig    │    │ Farmer/Vendor  │    │ 9012..9016   │  │   │
//! │  │   │ JitterSource  │    │ Auth/Analytics │    │ FM401/VEN105 │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`api`] - The [`MockApi`] handle
//! - [`config`] - Latency configuration
//! - [`error`] - Mock API error types
//! - [`random`] - Noise source for the price analysis
//! - [`repository`] - Repository implementations
//! - [`seed`] - Initial records
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mandi_mock::{MockApi, MockConfig};
//!
//! let api = MockApi::new(MockConfig::default());
//!
//! let results = api.products().search("rice").await;
//! let summary = api.farmer_orders().summary().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod config;
pub mod error;
pub mod random;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use api::MockApi;
pub use config::MockConfig;
pub use error::{ApiError, ApiResult};
pub use random::{FixedJitter, JitterSource, ThreadRngJitter};
pub use seed::SeedData;

// Repository re-exports for convenience
pub use repository::{
    AnalyticsRepository, AuthRepository, FarmerOrderRepository, LoginResponse, ProductRepository,
    VendorOrderRepository,
};
