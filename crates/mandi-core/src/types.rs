//! # Domain Types
//!
//! Core domain types shared by the mock API, the session store and the
//! frontend (via generated TypeScript bindings).
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  FarmerOrder    │   │  VendorOrder    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64, 301+) │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  name, farmer   │   │  vendor         │   │  product, qty   │       │
//! │  │  price, unit    │   │  total "₹.."    │   │  total "₹.."    │       │
//! │  │  stock          │   │  status/payment │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │      Role       │   │  OrderStatus    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id "FM401"     │   │  Farmer         │   │  New Order      │       │
//! │  │  role, email    │   │  Vendor         │   │  In Transit ... │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Shape
//! Every type serializes in the camelCase shape the dashboard pages read,
//! so a value from the mock API can be handed to the frontend as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// Which side of the marketplace a user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Role {
    /// Seller: lists produce, receives sales orders.
    Farmer,
    /// Buyer: browses produce, places orders.
    Vendor,
}

impl Role {
    /// Both roles, in display order.
    pub const ALL: [Role; 2] = [Role::Farmer, Role::Vendor];

    /// Returns the role name as shown in the UI.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "Farmer",
            Role::Vendor => "Vendor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "farmer" => Ok(Role::Farmer),
            "vendor" => Ok(Role::Vendor),
            other => Err(CoreError::UnknownRole(other.to_string())),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A produce listing offered by a farmer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Listing id, auto-assigned (first listing is 301).
    pub id: i64,

    /// Display name, e.g. "Organic Tomatoes".
    pub name: String,

    /// Price per unit in rupees.
    pub price: f64,

    /// Selling unit: "kg", "dozen", "bag", ...
    pub unit: String,

    /// Name of the farm offering the listing.
    pub farmer: String,

    /// Units currently available.
    pub stock: i64,

    pub description: String,
}

impl Product {
    /// Builds a stored record from caller-supplied fields and an assigned id.
    pub fn from_new(id: i64, new: NewProduct) -> Self {
        Product {
            id,
            name: new.name,
            price: new.price,
            unit: new.unit,
            farmer: new.farmer,
            stock: new.stock,
            description: new.description,
        }
    }

    /// Shallow-merges an update onto this record.
    ///
    /// Only fields present in `update` are overwritten; the id never changes.
    pub fn apply(&mut self, update: &ProductUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(unit) = &update.unit {
            self.unit = unit.clone();
        }
        if let Some(farmer) = &update.farmer {
            self.farmer = farmer.clone();
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
    }

    /// Case-insensitive substring match against name or farmer.
    ///
    /// `needle` must already be lowercase. An empty needle matches everything.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.farmer.to_lowercase().contains(needle)
    }
}

/// Fields for a new listing (everything except the id).
///
/// Absent fields default, so partially filled forms can still be submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub unit: String,
    pub farmer: String,
    pub stock: i64,
    pub description: String,
}

/// A partial listing used for in-place edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub farmer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,
}

impl ProductUpdate {
    /// An update that only changes the price.
    pub fn price(price: f64) -> Self {
        ProductUpdate {
            price: Some(price),
            ..Default::default()
        }
    }

    /// An update that only changes the stock level.
    pub fn stock(stock: i64) -> Self {
        ProductUpdate {
            stock: Some(stock),
            ..Default::default()
        }
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self == &ProductUpdate::default()
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle status of an order.
///
/// The set is open: statuses the pages do not know about are kept verbatim
/// in [`OrderStatus::Other`] and serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    NewOrder,
    AwaitingAcceptance,
    Accepted,
    Rejected,
    Processing,
    Outbound,
    InTransit,
    AwaitingPickup,
    Delivered,
    Other(String),
}

impl OrderStatus {
    /// Returns the status label as shown in the UI.
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::NewOrder => "New Order",
            OrderStatus::AwaitingAcceptance => "Awaiting Acceptance",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::Processing => "Processing",
            OrderStatus::Outbound => "Outbound",
            OrderStatus::InTransit => "In Transit",
            OrderStatus::AwaitingPickup => "Awaiting Pickup",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Other(label) => label,
        }
    }

    /// True while the farmer still has to accept or reject the order.
    pub fn is_awaiting_decision(&self) -> bool {
        matches!(self, OrderStatus::NewOrder | OrderStatus::AwaitingAcceptance)
    }

    /// True once accepted but not yet delivered.
    pub fn is_pending_delivery(&self) -> bool {
        matches!(
            self,
            OrderStatus::Accepted
                | OrderStatus::Processing
                | OrderStatus::Outbound
                | OrderStatus::InTransit
        )
    }
}

impl From<String> for OrderStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "New Order" => OrderStatus::NewOrder,
            "Awaiting Acceptance" => OrderStatus::AwaitingAcceptance,
            "Accepted" => OrderStatus::Accepted,
            "Rejected" => OrderStatus::Rejected,
            "Processing" => OrderStatus::Processing,
            "Outbound" => OrderStatus::Outbound,
            "In Transit" => OrderStatus::InTransit,
            "Awaiting Pickup" => OrderStatus::AwaitingPickup,
            "Delivered" => OrderStatus::Delivered,
            _ => OrderStatus::Other(label),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(label: &str) -> Self {
        OrderStatus::from(label.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Whether the buyer has paid for a farmer's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentStatus {
    Paid,
    #[serde(rename = "Awaiting Payment")]
    AwaitingPayment,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Paid => write!(f, "Paid"),
            PaymentStatus::AwaitingPayment => write!(f, "Awaiting Payment"),
        }
    }
}

// =============================================================================
// Orders
// =============================================================================

/// A sales order as seen from the farmer's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FarmerOrder {
    pub id: i64,
    pub product: String,
    /// Free-form quantity with unit, e.g. "1500 kg".
    pub qty: String,
    /// Buying vendor / market.
    pub vendor: String,
    /// Currency-formatted total, e.g. "₹52,500".
    pub total: String,
    #[ts(as = "String")]
    pub status: OrderStatus,
    pub payment: PaymentStatus,
}

impl FarmerOrder {
    /// Parses the formatted total.
    pub fn total_amount(&self) -> CoreResult<Money> {
        self.total.parse()
    }
}

/// A purchase order as seen from the vendor's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VendorOrder {
    pub id: i64,
    pub product: String,
    pub qty: String,
    pub total: String,
    #[ts(as = "String")]
    pub status: OrderStatus,
}

impl VendorOrder {
    /// Parses the formatted total.
    pub fn total_amount(&self) -> CoreResult<Money> {
        self.total.parse()
    }
}

/// Headline numbers for the farmer's sales-orders page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FarmerOrderSummary {
    /// Orders waiting for accept/reject.
    pub new_orders: usize,
    /// Accepted orders not yet delivered.
    pub pending_delivery: usize,
    /// Sum of totals still awaiting payment, in paise.
    #[ts(as = "i64")]
    pub payments_due: Money,
}

/// Headline numbers for the vendor's orders page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VendorOrderSummary {
    pub awaiting_pickup: usize,
    pub in_transit: usize,
    pub delivered: usize,
}

// =============================================================================
// Users
// =============================================================================

/// A registered marketplace user (static reference data).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub role: Role,
    pub email: String,
    pub name: String,
    /// Business id, e.g. "FM401".
    pub id: String,
}

/// The identity part of a user carried in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        UserInfo {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

// =============================================================================
// Price Analysis
// =============================================================================

/// One day of the synthetic price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricePoint {
    /// Day number, starting at 1.
    pub day: u32,
    /// Price in rupees per unit.
    pub price: f64,
}

/// Market price report for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AnalysisReport {
    pub product: String,
    pub range: String,
    pub avg_market_price: f64,
    pub avg_selling_price: f64,
    pub highest_price: f64,
    /// Percentage change from the first to the last day of the series.
    pub price_trend: f64,
    pub series: Vec<PricePoint>,
    #[ts(as = "String")]
    pub generated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
