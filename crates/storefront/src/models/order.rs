//! Order models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use velvet_loom_core::{
    CancellationStatus, OrderId, OrderItemId, OrderStatus, PaymentStatus, ProductId, UserId,
};

/// An order row.
///
/// Totals and the shipping address are snapshots taken at creation; later
/// catalog or address edits do not affect placed orders.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    #[serde(skip_serializing)]
    pub user_id: UserId,
    /// Human-facing order number, e.g. "VL-20260815-004217".
    pub order_number: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub cancellation_status: CancellationStatus,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    /// Gateway order id returned at checkout.
    pub gateway_order_id: Option<String>,
    /// Gateway payment id recorded at verification.
    pub gateway_payment_id: Option<String>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub shipping_address: ShippingAddress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shipping address snapshot columns on the order row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShippingAddress {
    pub ship_recipient: String,
    pub ship_phone: String,
    pub ship_line1: String,
    pub ship_line2: Option<String>,
    pub ship_city: String,
    pub ship_state: String,
    pub ship_postal_code: String,
    pub ship_country: String,
}

/// An order line with its product snapshot.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: OrderItemId,
    #[serde(skip_serializing)]
    pub order_id: OrderId,
    pub product_id: ProductId,
    /// Product title at purchase time.
    pub title: String,
    pub variant_label: Option<String>,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub image_url: Option<String>,
}

/// An order with its items, as returned by detail endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}
