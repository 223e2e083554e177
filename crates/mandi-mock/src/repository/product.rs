//! # Product Repository
//!
//! Listing operations for the farmer and vendor pages.
//!
//! ## Key Operations
//! - Listing, lookup by id, substring search
//! - Add with auto-assigned ids
//! - Shallow-merge updates
//!
//! ## Id Assignment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  next id = max(existing ids ∪ {300}) + 1                                │
//! │                                                                         │
//! │  []              → 301                                                  │
//! │  [301, 302, 303] → 304                                                  │
//! │  [301, 450]      → 451                                                  │
//! │                                                                         │
//! │  The max is taken and the record pushed under ONE write lock, so two    │
//! │  concurrent adds can never compute the same id.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use tracing::{debug, info};

use mandi_core::{NewProduct, Product, ProductUpdate, PRODUCT_ID_FLOOR};

use super::{find, id_key, position_of, snapshot, Shared};
use crate::config::{Delay, MockConfig};
use crate::error::{ApiError, ApiResult};

/// Repository for product listings.
///
/// ## Usage
/// ```rust,ignore
/// let repo = api.products();
///
/// let results = repo.search("rice").await;
/// let product = repo.get_by_id(301).await;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    products: Shared<Product>,
    config: MockConfig,
}

impl ProductRepository {
    pub(crate) fn new(products: Shared<Product>, config: MockConfig) -> Self {
        ProductRepository { products, config }
    }

    /// Returns every listing in insertion order.
    pub async fn list(&self) -> Vec<Product> {
        self.config.simulate(Delay::Default).await;

        let products = snapshot(&self.products).await;
        debug!(count = products.len(), "Listed products");
        products
    }

    /// Gets a listing by id.
    ///
    /// ## Returns
    /// * `Some(Product)` - Listing found
    /// * `None` - No listing with that id
    pub async fn get_by_id(&self, id: impl fmt::Display) -> Option<Product> {
        self.config.simulate(Delay::Default).await;

        let key = id_key(id);
        let product = find(&self.products, &key).await;
        debug!(id = %key, found = product.is_some(), "Looked up product");
        product
    }

    /// Adds a listing and returns the stored record.
    ///
    /// Never rejects: validation is the caller's job
    /// (see `mandi_core::validation::validate_new_product`).
    pub async fn add(&self, new: NewProduct) -> Product {
        self.config.simulate(Delay::Default).await;

        let mut products = self.products.write().await;
        let id = next_product_id(&products);
        let product = Product::from_new(id, new);
        products.push(product.clone());

        info!(id, name = %product.name, "Product added");
        product
    }

    /// Shallow-merges `update` onto an existing listing.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The merged record
    /// * `Err(ApiError::NotFound)` - No listing with that id; nothing changed
    pub async fn update(&self, id: impl fmt::Display, update: ProductUpdate) -> ApiResult<Product> {
        self.config.simulate(Delay::Default).await;

        let key = id_key(id);
        let mut products = self.products.write().await;
        let idx = position_of(&products, &key).ok_or_else(|| ApiError::not_found("Product", &key))?;

        let product = &mut products[idx];
        product.apply(&update);

        debug!(id = %key, "Product updated");
        Ok(product.clone())
    }

    /// Case-insensitive substring search over listing name and farmer.
    ///
    /// An empty query returns every listing.
    pub async fn search(&self, query: &str) -> Vec<Product> {
        self.config.simulate(Delay::Search).await;

        let needle = query.to_lowercase();
        let results: Vec<Product> = self
            .products
            .read()
            .await
            .iter()
            .filter(|p| p.matches(&needle))
            .cloned()
            .collect();

        debug!(query = %query, count = results.len(), "Search returned products");
        results
    }

    /// Returns the listings of one farm (case-insensitive exact match).
    pub async fn list_by_farmer(&self, farmer: &str) -> Vec<Product> {
        self.config.simulate(Delay::Default).await;

        let farmer = farmer.trim().to_lowercase();
        self.products
            .read()
            .await
            .iter()
            .filter(|p| p.farmer.to_lowercase() == farmer)
            .cloned()
            .collect()
    }

    /// Counts listings (for diagnostics, no simulated latency).
    pub async fn count(&self) -> usize {
        self.products.read().await.len()
    }
}

/// Next free listing id: one above the highest id, never below 301.
fn next_product_id(products: &[Product]) -> i64 {
    products.iter().map(|p| p.id).fold(PRODUCT_ID_FLOOR, i64::max) + 1
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;
    use crate::{MockApi, MockConfig};
    use std::collections::HashSet;
    use std::time::Duration;

    fn api() -> MockApi {
        MockApi::new(MockConfig::instant())
    }

    fn listing(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: 10.0,
            unit: "kg".to_string(),
            farmer: "F".to_string(),
            stock: 5,
            description: "d".to_string(),
        }
    }

    #[test]
    fn test_next_product_id() {
        assert_eq!(next_product_id(&[]), 301);

        let seed = SeedData::default();
        assert_eq!(next_product_id(&seed.products), 304);

        let mut low = seed.products[0].clone();
        low.id = 12;
        assert_eq!(next_product_id(&[low]), 301);
    }

    #[tokio::test]
    async fn test_add_assigns_next_id() {
        let api = api();

        let created = api.products().add(listing("X")).await;

        assert_eq!(created.id, 304);
        assert_eq!(created.name, "X");
        assert_eq!(created.price, 10.0);
        assert_eq!(created.unit, "kg");
        assert_eq!(created.farmer, "F");
        assert_eq!(created.stock, 5);
        assert_eq!(created.description, "d");
        assert_eq!(api.products().list().await.len(), 4);
    }

    #[tokio::test]
    async fn test_add_to_empty_collection_starts_at_301() {
        let api = MockApi::empty(MockConfig::instant());
        assert_eq!(api.products().add(listing("First")).await.id, 301);
    }

    #[tokio::test]
    async fn test_repeated_adds_yield_distinct_increasing_ids() {
        let repo = api().products();
        let mut ids = Vec::new();

        for i in 0..10 {
            ids.push(repo.add(listing(&format!("Item {i}"))).await.id);
        }

        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 10);
        assert!(ids.iter().all(|id| *id > 303));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_never_share_an_id() {
        let api = MockApi::new(MockConfig::instant().default_delay(Duration::from_millis(5)));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = api.products();
                tokio::spawn(async move { repo.add(listing(&format!("Lot {i}"))).await.id })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }

        assert_eq!(ids.len(), 16);
        assert_eq!(ids.iter().min(), Some(&304));
        assert_eq!(ids.iter().max(), Some(&319));
        assert_eq!(api.products().count().await, 19);
    }

    #[tokio::test]
    async fn test_get_by_id_coerces_strings() {
        let repo = api().products();

        let by_number = repo.get_by_id(302).await.unwrap();
        let by_string = repo.get_by_id("302").await.unwrap();

        assert_eq!(by_number, by_string);
        assert_eq!(by_number.name, "Fresh Bananas");
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let repo = api().products();
        assert!(repo.get_by_id(999).await.is_none());
        assert!(repo.get_by_id("not-an-id").await.is_none());
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() {
        let repo = api().products();
        let before = repo.get_by_id(301).await.unwrap();

        let updated = repo.update("301", ProductUpdate::price(40.0)).await.unwrap();

        assert_eq!(updated.price, 40.0);
        assert_eq!(
            Product {
                price: before.price,
                ..updated.clone()
            },
            before
        );
        assert_eq!(repo.get_by_id(301).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_missing_id_leaves_collection_unchanged() {
        let repo = api().products();
        let before = repo.list().await;

        let err = repo.update(999, ProductUpdate::stock(1)).await.unwrap_err();

        assert_eq!(err, ApiError::not_found("Product", "999"));
        assert_eq!(repo.list().await, before);
    }

    #[tokio::test]
    async fn test_list_returns_independent_copies() {
        let repo = api().products();

        let mut first = repo.list().await;
        let second = repo.list().await;
        assert_eq!(first, second);

        first[0].name = "Tampered".to_string();
        first.clear();

        assert_eq!(repo.list().await, second);
        assert_eq!(second[0].name, "Organic Tomatoes");
    }

    #[tokio::test]
    async fn test_search() {
        let repo = api().products();

        assert_eq!(repo.search("").await.len(), 3);
        assert!(repo.search("zzz-no-match").await.is_empty());

        let by_name = repo.search("BANANA").await;
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, 302);

        let by_farmer = repo.search("grainhouse").await;
        assert_eq!(by_farmer.len(), 1);
        assert_eq!(by_farmer[0].id, 303);
    }

    #[tokio::test]
    async fn test_list_by_farmer() {
        let repo = api().products();
        repo.add(NewProduct {
            farmer: "Sanket Farms".to_string(),
            ..listing("Green Chillies")
        })
        .await;

        let own = repo.list_by_farmer("sanket farms").await;
        assert_eq!(own.len(), 2);
        assert!(own.iter().all(|p| p.farmer == "Sanket Farms"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_classes() {
        let repo = MockApi::new(MockConfig::new()).products();

        let start = tokio::time::Instant::now();
        repo.list().await;
        assert!(start.elapsed() >= Duration::from_millis(400));

        let start = tokio::time::Instant::now();
        repo.search("rice").await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_millis(400));
    }
}
