//! Reporting models. Revenue figures count PAID orders only.

use rust_decimal::Decimal;
use serde::Serialize;

use velvet_loom_core::ProductId;

/// Dashboard headline numbers.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DashboardKpis {
    pub total_revenue: Decimal,
    pub order_count: i64,
    pub customer_count: i64,
    pub product_count: i64,
    pub pending_cancellations: i64,
}

/// One month's revenue bucket. Buckets are computed in Rust from the raw
/// order rows rather than in SQL, so empty months still appear as zeros.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyRevenue {
    /// First day of the month (UTC).
    pub month: chrono::NaiveDate,
    pub order_count: i64,
    pub revenue: Decimal,
}

/// A best-selling product over the report window.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TopProduct {
    pub product_id: ProductId,
    pub title: String,
    pub units_sold: i64,
    pub revenue: Decimal,
}
