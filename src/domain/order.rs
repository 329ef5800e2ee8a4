use jiff::Timestamp;
use std::fmt;

/// Fulfillment status. Strictly forward-only: Processing → Shipped →
/// Delivered, with skipping ahead allowed and Delivered terminal.
///
/// The derived ordering is what makes the monotonic-transition check a
/// single comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        };
        f.write_str(label)
    }
}

/// A customer order. Top-level aggregate; its items are snapshots taken at
/// order time and are never re-linked to the live product.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub shipping_info: ShippingInfo,
    pub items: Vec<OrderItem>,
    pub payment_info: PaymentInfo,
    pub items_price: f64,
    pub tax_price: f64,
    pub shipping_price: f64,
    pub total_price: f64,
    pub status: OrderStatus,
    pub user_id: String,
    pub created_at: Timestamp,
    pub paid_at: Timestamp,
    pub delivered_at: Option<Timestamp>,
    /// Display name of the user who marked the order Delivered.
    pub delivered_by: Option<String>,
}

/// One order line: product reference, quantity, and the unit price and name
/// captured when the order was placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShippingInfo {
    pub address: String,
    pub city: String,
    pub country: String,
    pub pin_code: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentInfo {
    pub id: String,
    pub status: String,
}
