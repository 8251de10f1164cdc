//! Customer models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use velvet_loom_core::{AddressId, UserId};

/// A customer row with order aggregates.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Customer {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub order_count: i64,
    /// Sum of paid order totals.
    pub total_spent: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A customer's saved shipping address, as shown in the back office.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CustomerAddress {
    pub id: AddressId,
    pub label: Option<String>,
    pub recipient: String,
    pub phone: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
}
