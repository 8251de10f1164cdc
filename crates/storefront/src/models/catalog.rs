//! Catalog models: products, variants, images, collections.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use velvet_loom_core::{CollectionId, ProductId, VariantId};

/// A sellable product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    /// URL-safe handle, unique across the catalog.
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    /// Base price; variants may override it.
    pub price: Decimal,
    /// Strike-through price for sale display, when higher than `price`.
    pub compare_at_price: Option<Decimal>,
    /// Set when an admin archives the product. Archived products are hidden
    /// from storefront queries but kept for order-item history.
    #[serde(skip_serializing)]
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A size/color variant of a product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductVariant {
    pub id: VariantId,
    #[serde(skip_serializing)]
    pub product_id: ProductId,
    pub sku: String,
    /// Display label, e.g. "M / Indigo".
    pub label: String,
    pub stock: i32,
    /// Overrides the product base price when set.
    pub price_override: Option<Decimal>,
}

/// A product image hosted on the media CDN.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductImage {
    pub url: String,
    pub alt: Option<String>,
    pub position: i32,
}

/// A curated product grouping.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Collection {
    pub id: CollectionId,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
