//! # Repository Module
//!
//! Collection access for the mock API.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Page code                                                             │
//! │       │                                                                 │
//! │       │  api.products().search("tomato")                               │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── simulate latency                                                  │
//! │  ├── read lock  → clone  (reads)                                       │
//! │  └── write lock → apply  (writes, one critical section each)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<RwLock<Vec<Product>>>  (owned by MockApi)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Copy Contract
//! Every read hands back clones: callers may mutate what they receive
//! without affecting storage. Write operations are the only path that
//! mutates a collection.
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`] - Listings CRUD and search
//! - [`FarmerOrderRepository`] / [`VendorOrderRepository`] - Orders
//! - [`AuthRepository`] - Login lookup
//! - [`AnalyticsRepository`] - Synthetic price analysis

pub mod analytics;
pub mod auth;
pub mod order;
pub mod product;

pub use analytics::AnalyticsRepository;
pub use auth::{AuthRepository, LoginResponse};
pub use order::{FarmerOrderRepository, VendorOrderRepository};
pub use product::ProductRepository;

use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

use mandi_core::{FarmerOrder, Product, VendorOrder};

/// A collection shared between the API handle and its repositories.
pub(crate) type Shared<T> = Arc<RwLock<Vec<T>>>;

/// Records addressable by a numeric id.
pub(crate) trait Record: Clone {
    fn record_id(&self) -> i64;
}

impl Record for Product {
    fn record_id(&self) -> i64 {
        self.id
    }
}

impl Record for FarmerOrder {
    fn record_id(&self) -> i64 {
        self.id
    }
}

impl Record for VendorOrder {
    fn record_id(&self) -> i64 {
        self.id
    }
}

/// Normalizes any id-like value to its string form.
///
/// Ids are compared as strings so that `301` and `"301"` address the same
/// record, whichever form the caller happens to hold.
pub(crate) fn id_key(id: impl fmt::Display) -> String {
    id.to_string()
}

/// Position of the record whose id renders as `key`.
pub(crate) fn position_of<T: Record>(records: &[T], key: &str) -> Option<usize> {
    records.iter().position(|r| r.record_id().to_string() == key)
}

/// Clones the whole collection under a read lock.
pub(crate) async fn snapshot<T: Clone>(collection: &Shared<T>) -> Vec<T> {
    collection.read().await.clone()
}

/// Clones the record whose id renders as `key`, if any.
pub(crate) async fn find<T: Record>(collection: &Shared<T>, key: &str) -> Option<T> {
    let records = collection.read().await;
    position_of(&records, key).map(|idx| records[idx].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_key_coerces() {
        assert_eq!(id_key(301), id_key("301"));
        assert_ne!(id_key(301), id_key(" 301"));
    }
}
