//! # Order Repositories
//!
//! Sales orders (farmer side) and purchase orders (vendor side).
//!
//! ## Farmer Decision Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   New Order / Awaiting Acceptance                                       │
//! │          │                    │                                         │
//! │     accept(id)           reject(id)                                     │
//! │          ▼                    ▼                                         │
//! │      Accepted             Rejected                                      │
//! │          │                                                              │
//! │   update_status(id, Processing → Outbound → In Transit → Delivered)     │
//! │                                                                         │
//! │   accept/reject from any other status → ApiError::InvalidTransition     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use tracing::{debug, info, warn};

use mandi_core::{
    FarmerOrder, FarmerOrderSummary, Money, OrderStatus, PaymentStatus, VendorOrder,
    VendorOrderSummary,
};

use super::{find, id_key, position_of, snapshot, Shared};
use crate::config::{Delay, MockConfig};
use crate::error::{ApiError, ApiResult};

// =============================================================================
// Farmer Orders
// =============================================================================

/// Repository for the farmer's sales orders.
#[derive(Debug, Clone)]
pub struct FarmerOrderRepository {
    orders: Shared<FarmerOrder>,
    config: MockConfig,
}

impl FarmerOrderRepository {
    pub(crate) fn new(orders: Shared<FarmerOrder>, config: MockConfig) -> Self {
        FarmerOrderRepository { orders, config }
    }

    /// Returns every sales order in insertion order.
    pub async fn list(&self) -> Vec<FarmerOrder> {
        self.config.simulate(Delay::Default).await;
        snapshot(&self.orders).await
    }

    /// Gets a sales order by id (`None` when absent).
    pub async fn get_by_id(&self, id: impl fmt::Display) -> Option<FarmerOrder> {
        self.config.simulate(Delay::Default).await;

        let key = id_key(id);
        let order = find(&self.orders, &key).await;
        debug!(id = %key, found = order.is_some(), "Looked up farmer order");
        order
    }

    /// Sets the status of a sales order unconditionally.
    pub async fn update_status(
        &self,
        id: impl fmt::Display,
        status: OrderStatus,
    ) -> ApiResult<FarmerOrder> {
        self.config.simulate(Delay::Default).await;

        let key = id_key(id);
        let mut orders = self.orders.write().await;
        let idx = position_of(&orders, &key).ok_or_else(|| ApiError::not_found("Order", &key))?;

        let order = &mut orders[idx];
        info!(id = %key, from = %order.status, to = %status, "Farmer order status changed");
        order.status = status;
        Ok(order.clone())
    }

    /// Accepts an order that is awaiting the farmer's decision.
    pub async fn accept(&self, id: impl fmt::Display) -> ApiResult<FarmerOrder> {
        self.decide(id_key(id), OrderStatus::Accepted).await
    }

    /// Rejects an order that is awaiting the farmer's decision.
    pub async fn reject(&self, id: impl fmt::Display) -> ApiResult<FarmerOrder> {
        self.decide(id_key(id), OrderStatus::Rejected).await
    }

    async fn decide(&self, key: String, to: OrderStatus) -> ApiResult<FarmerOrder> {
        self.config.simulate(Delay::Default).await;

        let mut orders = self.orders.write().await;
        let idx = position_of(&orders, &key).ok_or_else(|| ApiError::not_found("Order", &key))?;

        let order = &mut orders[idx];
        if !order.status.is_awaiting_decision() {
            return Err(ApiError::InvalidTransition {
                entity: "Order".to_string(),
                id: key,
                from: order.status.to_string(),
                to: to.to_string(),
            });
        }

        info!(id = %key, decision = %to, "Farmer responded to order");
        order.status = to;
        Ok(order.clone())
    }

    /// Headline numbers for the sales-orders page.
    ///
    /// Totals that cannot be parsed are left out of `payments_due`; the sum
    /// saturates instead of overflowing.
    pub async fn summary(&self) -> FarmerOrderSummary {
        self.config.simulate(Delay::Default).await;

        let orders = self.orders.read().await;
        let new_orders = orders
            .iter()
            .filter(|o| o.status.is_awaiting_decision())
            .count();
        let pending_delivery = orders
            .iter()
            .filter(|o| o.status.is_pending_delivery())
            .count();
        let payments_due: Money = orders
            .iter()
            .filter(|o| o.payment == PaymentStatus::AwaitingPayment)
            .filter_map(|o| match o.total_amount() {
                Ok(amount) => Some(amount),
                Err(e) => {
                    warn!(id = o.id, error = %e, "Skipping unparseable order total");
                    None
                }
            })
            .sum();

        FarmerOrderSummary {
            new_orders,
            pending_delivery,
            payments_due,
        }
    }
}

// =============================================================================
// Vendor Orders
// =============================================================================

/// Repository for the vendor's purchase orders.
#[derive(Debug, Clone)]
pub struct VendorOrderRepository {
    orders: Shared<VendorOrder>,
    config: MockConfig,
}

impl VendorOrderRepository {
    pub(crate) fn new(orders: Shared<VendorOrder>, config: MockConfig) -> Self {
        VendorOrderRepository { orders, config }
    }

    /// Returns every purchase order in insertion order.
    pub async fn list(&self) -> Vec<VendorOrder> {
        self.config.simulate(Delay::Default).await;
        snapshot(&self.orders).await
    }

    /// Gets a purchase order by id (`None` when absent).
    pub async fn get_by_id(&self, id: impl fmt::Display) -> Option<VendorOrder> {
        self.config.simulate(Delay::Default).await;

        let key = id_key(id);
        let order = find(&self.orders, &key).await;
        debug!(id = %key, found = order.is_some(), "Looked up vendor order");
        order
    }

    /// Sets the status of a purchase order.
    pub async fn update_status(
        &self,
        id: impl fmt::Display,
        status: OrderStatus,
    ) -> ApiResult<VendorOrder> {
        self.config.simulate(Delay::Default).await;

        let key = id_key(id);
        let mut orders = self.orders.write().await;
        let idx = position_of(&orders, &key).ok_or_else(|| ApiError::not_found("Order", &key))?;

        let order = &mut orders[idx];
        info!(id = %key, from = %order.status, to = %status, "Vendor order status changed");
        order.status = status;
        Ok(order.clone())
    }

    /// Headline numbers for the vendor's orders page.
    pub async fn summary(&self) -> VendorOrderSummary {
        self.config.simulate(Delay::Default).await;

        let orders = self.orders.read().await;
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();

        VendorOrderSummary {
            awaiting_pickup: count(OrderStatus::AwaitingPickup),
            in_transit: count(OrderStatus::InTransit),
            delivered: count(OrderStatus::Delivered),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
