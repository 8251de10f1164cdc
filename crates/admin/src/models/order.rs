//! Admin-side order models.
//!
//! Unlike the storefront views, these include the customer columns and the
//! cancellation reason, joined from `shop.users`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use velvet_loom_core::{
    CancellationStatus, OrderId, OrderItemId, OrderStatus, PaymentStatus, ProductId, UserId,
};

/// An order row with customer identification.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdminOrder {
    pub id: OrderId,
    pub user_id: UserId,
    pub order_number: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub cancellation_status: CancellationStatus,
    pub cancellation_reason: Option<String>,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub ship_recipient: String,
    pub ship_phone: String,
    pub ship_line1: String,
    pub ship_line2: Option<String>,
    pub ship_city: String,
    pub ship_state: String,
    pub ship_postal_code: String,
    pub ship_country: String,
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order line with its product snapshot.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdminOrderItem {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub title: String,
    pub variant_label: Option<String>,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub image_url: Option<String>,
}

/// An order with its items, as returned by the detail endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AdminOrderDetail {
    #[serde(flatten)]
    pub order: AdminOrder,
    pub items: Vec<AdminOrderItem>,
}
