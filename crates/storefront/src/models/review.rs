//! Product review models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use velvet_loom_core::{ProductId, ReviewId, UserId};

/// A customer review of a product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Review {
    pub id: ReviewId,
    #[serde(skip_serializing)]
    pub product_id: ProductId,
    #[serde(skip_serializing)]
    pub user_id: UserId,
    /// Display name snapshot (from the user's profile at review time).
    pub author_name: String,
    /// 1..=5 stars.
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Aggregate rating shown on the product detail page.
#[derive(Debug, Clone, Copy, Serialize, sqlx::FromRow)]
pub struct ReviewSummary {
    pub review_count: i64,
    /// Mean rating, `None` when there are no reviews.
    pub average_rating: Option<f64>,
}
