//! # Seed Data
//!
//! The records a fresh mock API starts with.
//!
//! ## Contents
//! - 3 product listings (ids 301-303)
//! - 5 farmer sales orders (ids 9012-9016) covering every delivery stage
//! - 2 vendor purchase orders (ids 5001-5002)
//! - 2 users, one per role (`FM401`, `VEN105`)

use mandi_core::{
    FarmerOrder, Money, OrderStatus, PaymentStatus, Product, Role, User, VendorOrder,
};

/// Initial contents of every collection.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedData {
    pub products: Vec<Product>,
    pub farmer_orders: Vec<FarmerOrder>,
    pub vendor_orders: Vec<VendorOrder>,
    pub users: Vec<User>,
}

impl SeedData {
    /// No records at all.
    pub fn empty() -> Self {
        SeedData {
            products: Vec::new(),
            farmer_orders: Vec::new(),
            vendor_orders: Vec::new(),
            users: Vec::new(),
        }
    }

    /// Replaces the products.
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }
}

impl Default for SeedData {
    fn default() -> Self {
        SeedData {
            products: seed_products(),
            farmer_orders: seed_farmer_orders(),
            vendor_orders: seed_vendor_orders(),
            users: seed_users(),
        }
    }
}

fn product(
    id: i64,
    name: &str,
    price: f64,
    unit: &str,
    farmer: &str,
    stock: i64,
    description: &str,
) -> Product {
    Product {
        id,
        name: name.to_string(),
        price,
        unit: unit.to_string(),
        farmer: farmer.to_string(),
        stock,
        description: description.to_string(),
    }
}

fn seed_products() -> Vec<Product> {
    vec![
        product(
            301,
            "Organic Tomatoes",
            35.0,
            "kg",
            "Sanket Farms",
            500,
            "Fresh vine-ripened tomatoes.",
        ),
        product(
            302,
            "Fresh Bananas",
            45.0,
            "dozen",
            "Green Orchard",
            200,
            "Sweet ripe bananas.",
        ),
        product(
            303,
            "Brown Rice (5kg)",
            220.0,
            "bag",
            "GrainHouse",
            120,
            "Premium brown rice.",
        ),
    ]
}

fn farmer_order(
    id: i64,
    product: &str,
    qty: &str,
    vendor: &str,
    total_rupees: i64,
    status: OrderStatus,
    payment: PaymentStatus,
) -> FarmerOrder {
    FarmerOrder {
        id,
        product: product.to_string(),
        qty: qty.to_string(),
        vendor: vendor.to_string(),
        total: Money::from_rupees(total_rupees).to_string(),
        status,
        payment,
    }
}

fn seed_farmer_orders() -> Vec<FarmerOrder> {
    vec![
        farmer_order(
            9012,
            "Organic Tomatoes",
            "1500 kg",
            "Dharwad Market",
            52_500,
            OrderStatus::Delivered,
            PaymentStatus::Paid,
        ),
        farmer_order(
            9013,
            "Premium Wheat",
            "50 Quintals",
            "Fresh Greens",
            110_000,
            OrderStatus::NewOrder,
            PaymentStatus::AwaitingPayment,
        ),
        farmer_order(
            9014,
            "Fresh Apples",
            "5 Tons",
            "Vishesh Market",
            600_000,
            OrderStatus::InTransit,
            PaymentStatus::Paid,
        ),
        farmer_order(
            9015,
            "Brown Rice",
            "2500 kg",
            "Agro Market",
            47_500,
            OrderStatus::Processing,
            PaymentStatus::Paid,
        ),
        farmer_order(
            9016,
            "Grapes",
            "100 Boxes",
            "Local Grocer",
            20_000,
            OrderStatus::Outbound,
            PaymentStatus::AwaitingPayment,
        ),
    ]
}

fn seed_vendor_orders() -> Vec<VendorOrder> {
    vec![
        VendorOrder {
            id: 5001,
            product: "Organic Tomatoes".to_string(),
            qty: "200 kg".to_string(),
            total: Money::from_rupees(7_000).to_string(),
            status: OrderStatus::AwaitingPickup,
        },
        VendorOrder {
            id: 5002,
            product: "Brown Rice (5kg)".to_string(),
            qty: "20 bags".to_string(),
            total: Money::from_rupees(4_400).to_string(),
            status: OrderStatus::Delivered,
        },
    ]
}

fn seed_users() -> Vec<User> {
    vec![
        User {
            role: Role::Farmer,
            email: "farmer@example.com".to_string(),
            name: "Sanket Hiremath".to_string(),
            id: "FM401".to_string(),
        },
        User {
            role: Role::Vendor,
            email: "vendor@example.com".to_string(),
            name: "Vishw Vora".to_string(),
            id: "VEN105".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let seed = SeedData::default();

        let product_ids: HashSet<i64> = seed.products.iter().map(|p| p.id).collect();
        assert_eq!(product_ids.len(), seed.products.len());

        let order_ids: HashSet<i64> = seed.farmer_orders.iter().map(|o| o.id).collect();
        assert_eq!(order_ids.len(), seed.farmer_orders.len());
    }

    #[test]
    fn test_seed_totals_are_formatted() {
        let seed = SeedData::default();
        assert_eq!(seed.farmer_orders[0].total, "₹52,500");
        assert_eq!(seed.farmer_orders[1].total, "₹1,10,000");
        assert_eq!(seed.vendor_orders[0].total, "₹7,000");
    }

    #[test]
    fn test_one_user_per_role() {
        let seed = SeedData::default();
        for role in Role::ALL {
            assert_eq!(seed.users.iter().filter(|u| u.role == role).count(), 1);
        }
    }
}
