//! # Mock API Handle
//!
//! [`MockApi`] owns every collection and hands out repositories over them.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use mandi_core::{FarmerOrder, Product, User, VendorOrder};

use crate::config::MockConfig;
use crate::random::{JitterSource, ThreadRngJitter};
use crate::repository::{
    AnalyticsRepository, AuthRepository, FarmerOrderRepository, ProductRepository, Shared,
    VendorOrderRepository,
};
use crate::seed::SeedData;

/// Main mock API handle providing repository access.
///
/// ## Ownership
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  MockApi (Clone = another handle to the SAME collections)               │
/// │  ├── products        Arc<RwLock<Vec<Product>>>                          │
/// │  ├── farmer_orders   Arc<RwLock<Vec<FarmerOrder>>>                      │
/// │  ├── vendor_orders   Arc<RwLock<Vec<VendorOrder>>>                      │
/// │  ├── users           Arc<Vec<User>>  (read-only)                        │
/// │  └── jitter          Arc<dyn JitterSource>                              │
/// │                                                                         │
/// │  Two MockApi::new(..) calls never share state.                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Example
/// ```rust,ignore
/// let api = MockApi::new(MockConfig::default());
///
/// let listings = api.products().list().await;
/// let session = api.auth().login(Role::Farmer, Some("farmer@example.com"), "pw").await?;
/// ```
#[derive(Debug, Clone)]
pub struct MockApi {
    config: MockConfig,
    products: Shared<Product>,
    farmer_orders: Shared<FarmerOrder>,
    vendor_orders: Shared<VendorOrder>,
    users: Arc<Vec<User>>,
    jitter: Arc<dyn JitterSource>,
}

impl MockApi {
    /// Creates an API populated with the standard seed data.
    pub fn new(config: MockConfig) -> Self {
        Self::with_seed(config, SeedData::default())
    }

    /// Creates an API with no records and no users.
    pub fn empty(config: MockConfig) -> Self {
        Self::with_seed(config, SeedData::empty())
    }

    /// Creates an API from caller-supplied records.
    pub fn with_seed(config: MockConfig, seed: SeedData) -> Self {
        info!(
            products = seed.products.len(),
            farmer_orders = seed.farmer_orders.len(),
            vendor_orders = seed.vendor_orders.len(),
            users = seed.users.len(),
            default_delay_ms = config.default_delay.as_millis() as u64,
            "Mock API initialized"
        );

        MockApi {
            config,
            products: Arc::new(RwLock::new(seed.products)),
            farmer_orders: Arc::new(RwLock::new(seed.farmer_orders)),
            vendor_orders: Arc::new(RwLock::new(seed.vendor_orders)),
            users: Arc::new(seed.users),
            jitter: Arc::new(ThreadRngJitter::new()),
        }
    }

    /// Replaces the noise source of the price analysis.
    pub fn with_jitter(mut self, jitter: Arc<dyn JitterSource>) -> Self {
        self.jitter = jitter;
        self
    }

    /// Returns the latency configuration.
    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.products.clone(), self.config)
    }

    /// Returns the farmer (sales) order repository.
    pub fn farmer_orders(&self) -> FarmerOrderRepository {
        FarmerOrderRepository::new(self.farmer_orders.clone(), self.config)
    }

    /// Returns the vendor (purchase) order repository.
    pub fn vendor_orders(&self) -> VendorOrderRepository {
        VendorOrderRepository::new(self.vendor_orders.clone(), self.config)
    }

    /// Returns the login repository.
    pub fn auth(&self) -> AuthRepository {
        AuthRepository::new(self.users.clone(), self.config)
    }

    /// Returns the analytics repository.
    pub fn analytics(&self) -> AnalyticsRepository {
        AnalyticsRepository::new(self.jitter.clone(), self.config)
    }
}

impl Default for MockApi {
    fn default() -> Self {
        MockApi::new(MockConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandi_core::NewProduct;

    #[tokio::test]
    async fn test_clones_share_collections() {
        let api = MockApi::new(MockConfig::instant());
        let other = api.clone();

        other.products().add(NewProduct::default()).await;

        assert_eq!(api.products().count().await, 4);
    }

    #[tokio::test]
    async fn test_instances_are_isolated() {
        let a = MockApi::new(MockConfig::instant());
        let b = MockApi::new(MockConfig::instant());

        a.products().add(NewProduct::default()).await;

        assert_eq!(a.products().count().await, 4);
        assert_eq!(b.products().count().await, 3);
    }

    #[tokio::test]
    async fn test_custom_seed() {
        let seed = SeedData::default().with_products(Vec::new());
        let api = MockApi::with_seed(MockConfig::instant(), seed);

        assert!(api.products().list().await.is_empty());
        assert_eq!(api.farmer_orders().list().await.len(), 5);
        assert_eq!(api.config(), &MockConfig::instant());
    }
}
