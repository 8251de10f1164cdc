//! Product catalog repository.
//!
//! Archived products (`archived_at IS NOT NULL`) never appear in storefront
//! results; their order-item snapshots keep history intact.

use rust_decimal::Decimal;
use sqlx::PgPool;

use velvet_loom_core::ProductId;

use super::RepositoryError;
use crate::models::{Product, ProductImage, ProductVariant};

/// Sort orders the product listing supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    TitleAsc,
}

impl ProductSort {
    const fn order_by(self) -> &'static str {
        match self {
            Self::Newest => "p.created_at DESC",
            Self::PriceAsc => "p.price ASC",
            Self::PriceDesc => "p.price DESC",
            Self::TitleAsc => "p.title ASC",
        }
    }
}

/// Filters for the product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the title.
    pub query: Option<String>,
    /// Restrict to a collection by slug.
    pub collection_slug: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: ProductSort,
    pub limit: i64,
    pub offset: i64,
}

/// Repository for product catalog reads.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products matching the filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        // The collection join is only added when filtering by collection so
        // the common listing stays a single-table scan.
        let sql = format!(
            r"
            SELECT p.id, p.slug, p.title, p.description, p.price,
                   p.compare_at_price, p.archived_at, p.created_at, p.updated_at
            FROM shop.products p
            {join}
            WHERE p.archived_at IS NULL
              AND ($1::text IS NULL OR p.title ILIKE '%' || $1 || '%')
              AND ($2::numeric IS NULL OR p.price >= $2)
              AND ($3::numeric IS NULL OR p.price <= $3)
              {collection_clause}
            ORDER BY {order_by}
            LIMIT $4 OFFSET $5
            ",
            join = if filter.collection_slug.is_some() {
                "JOIN shop.product_collections pc ON pc.product_id = p.id
                 JOIN shop.collections c ON c.id = pc.collection_id"
            } else {
                ""
            },
            collection_clause = if filter.collection_slug.is_some() {
                "AND c.slug = $6"
            } else {
                ""
            },
            order_by = filter.sort.order_by(),
        );

        let mut query = sqlx::query_as::<_, Product>(&sql)
            .bind(filter.query.as_deref())
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(filter.limit)
            .bind(filter.offset);
        if let Some(slug) = filter.collection_slug.as_deref() {
            query = query.bind(slug);
        }

        Ok(query.fetch_all(self.pool).await?)
    }

    /// Get a live product by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT id, slug, title, description, price,
                   compare_at_price, archived_at, created_at, updated_at
            FROM shop.products
            WHERE slug = $1 AND archived_at IS NULL
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Variants of a product, in sku order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn variants(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ProductVariant>, RepositoryError> {
        let variants = sqlx::query_as::<_, ProductVariant>(
            r"
            SELECT id, product_id, sku, label, stock, price_override
            FROM shop.product_variants
            WHERE product_id = $1
            ORDER BY sku
            ",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(variants)
    }

    /// Images of a product, in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn images(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ProductImage>, RepositoryError> {
        let images = sqlx::query_as::<_, ProductImage>(
            r"
            SELECT url, alt, position
            FROM shop.product_images
            WHERE product_id = $1
            ORDER BY position
            ",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(images)
    }
}
