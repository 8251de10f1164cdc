//! Admin catalog repository. Unlike the storefront, archived products are
//! visible here; archive is a soft delete via `archived_at`.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use velvet_loom_core::{ProductId, VariantId};

use super::RepositoryError;
use crate::models::{Product, ProductImage, ProductVariant};

const PRODUCT_COLUMNS: &str = "id, slug, title, description, price, \
     compare_at_price, archived_at, created_at, updated_at";

/// Fields for creating or updating a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub compare_at_price: Option<Decimal>,
}

/// Fields for a variant, upserted by SKU.
#[derive(Debug, Clone)]
pub struct VariantInput {
    pub sku: String,
    pub label: String,
    pub stock: i32,
    pub price_override: Option<Decimal>,
}

/// Fields for a product image; `url` comes from the media service.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub url: String,
    pub alt: Option<String>,
    pub position: i32,
}

/// Repository for catalog management.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, newest first, archived ones included. `search`
    /// matches title or slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        search: Option<&str>,
        include_archived: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM shop.products
            WHERE ($1::text IS NULL OR title ILIKE '%' || $1 || '%' OR slug ILIKE '%' || $1 || '%')
              AND ($2 OR archived_at IS NULL)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(search)
            .bind(include_archived)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }

    /// One product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM shop.products WHERE id = $1");
        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Variants of a product, in SKU order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn variants(&self, id: ProductId) -> Result<Vec<ProductVariant>, RepositoryError> {
        let variants = sqlx::query_as::<_, ProductVariant>(
            r"
            SELECT id, product_id, sku, label, stock, price_override
            FROM shop.product_variants
            WHERE product_id = $1
            ORDER BY sku
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(variants)
    }

    /// Images of a product, in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn images(&self, id: ProductId) -> Result<Vec<ProductImage>, RepositoryError> {
        let images = sqlx::query_as::<_, ProductImage>(
            r"
            SELECT url, alt, position
            FROM shop.product_images
            WHERE product_id = $1
            ORDER BY position
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(images)
    }

    /// Create a product together with its variants and images.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug or a SKU is taken.
    pub async fn create(
        &self,
        input: &ProductInput,
        variants: &[VariantInput],
        images: &[ImageInput],
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r"
            INSERT INTO shop.products (slug, title, description, price, compare_at_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PRODUCT_COLUMNS}
            "
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(input.description.as_deref())
            .bind(input.price)
            .bind(input.compare_at_price)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                RepositoryError::from_unique_violation(e, "a product with this slug already exists")
            })?;

        for variant in variants {
            insert_variant(&mut tx, product.id, variant).await?;
        }
        for image in images {
            insert_image(&mut tx, product.id, image).await?;
        }

        tx.commit().await?;
        Ok(product)
    }

    /// Update the product fields and, when given, replace its variant and
    /// image sets. Variants are upserted by SKU; SKUs absent from the new
    /// set are removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist,
    /// or `RepositoryError::Conflict` when a removed variant is still
    /// referenced by a cart or order.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
        variants: Option<&[VariantInput]>,
        images: Option<&[ImageInput]>,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            r"
            UPDATE shop.products
            SET slug = $2, title = $3, description = $4, price = $5,
                compare_at_price = $6, updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(input.description.as_deref())
            .bind(input.price)
            .bind(input.compare_at_price)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                RepositoryError::from_unique_violation(e, "a product with this slug already exists")
            })?
            .ok_or(RepositoryError::NotFound)?;

        if let Some(variants) = variants {
            let kept: Vec<&str> = variants.iter().map(|v| v.sku.as_str()).collect();
            sqlx::query("DELETE FROM shop.product_variants WHERE product_id = $1 AND sku <> ALL($2)")
                .bind(id)
                .bind(&kept)
                .execute(&mut *tx)
                .await
                .map_err(map_fk_violation)?;
            for variant in variants {
                insert_variant(&mut tx, id, variant).await?;
            }
        }

        if let Some(images) = images {
            sqlx::query("DELETE FROM shop.product_images WHERE product_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for image in images {
                insert_image(&mut tx, id, image).await?;
            }
        }

        tx.commit().await?;
        Ok(product)
    }

    /// Adjust the stock level of a single variant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the variant does not exist.
    pub async fn set_stock(
        &self,
        variant_id: VariantId,
        stock: i32,
    ) -> Result<ProductVariant, RepositoryError> {
        sqlx::query_as::<_, ProductVariant>(
            r"
            UPDATE shop.product_variants
            SET stock = $2
            WHERE id = $1
            RETURNING id, product_id, sku, label, stock, price_override
            ",
        )
        .bind(variant_id)
        .bind(stock)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Soft-delete a product. Archived products disappear from the
    /// storefront but keep their order history.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn archive(&self, id: ProductId) -> Result<Product, RepositoryError> {
        self.set_archived(id, Some(Utc::now())).await
    }

    /// Restore an archived product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn unarchive(&self, id: ProductId) -> Result<Product, RepositoryError> {
        self.set_archived(id, None).await
    }

    async fn set_archived(
        &self,
        id: ProductId,
        archived_at: Option<chrono::DateTime<Utc>>,
    ) -> Result<Product, RepositoryError> {
        let sql = format!(
            r"
            UPDATE shop.products
            SET archived_at = $2, updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(archived_at)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }
}

async fn insert_variant(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    product_id: ProductId,
    variant: &VariantInput,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO shop.product_variants (product_id, sku, label, stock, price_override)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (sku) DO UPDATE
        SET label = EXCLUDED.label,
            stock = EXCLUDED.stock,
            price_override = EXCLUDED.price_override
        ",
    )
    .bind(product_id)
    .bind(&variant.sku)
    .bind(&variant.label)
    .bind(variant.stock)
    .bind(variant.price_override)
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        RepositoryError::from_unique_violation(e, "a variant with this label already exists")
    })?;

    Ok(())
}

async fn insert_image(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    product_id: ProductId,
    image: &ImageInput,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO shop.product_images (product_id, url, alt, position)
        VALUES ($1, $2, $3, $4)
        ",
    )
    .bind(product_id)
    .bind(&image.url)
    .bind(image.alt.as_deref())
    .bind(image.position)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

// Foreign-key violation: a variant still referenced by carts or orders.
fn map_fk_violation(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23503") {
            return RepositoryError::Conflict(
                "variant is referenced by existing carts or orders".into(),
            );
        }
    }
    RepositoryError::Database(err)
}
