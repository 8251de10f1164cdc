//! Cart repository.
//!
//! A cart line is unique per user/product/variant; adding an existing line
//! upserts the quantity through the table's unique constraint rather than
//! through any in-process coordination.

use sqlx::PgPool;

use velvet_loom_core::{CartItemId, ProductId, UserId, VariantId};

use super::RepositoryError;
use crate::models::CartLine;

/// Repository for cart operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

const CART_LINE_SELECT: &str = r"
    SELECT ci.id, ci.product_id, ci.variant_id,
           p.slug, p.title,
           v.label AS variant_label,
           COALESCE(v.price_override, p.price) AS unit_price,
           ci.quantity,
           img.url AS image_url
    FROM shop.cart_items ci
    JOIN shop.products p ON p.id = ci.product_id
    LEFT JOIN shop.product_variants v ON v.id = ci.variant_id
    LEFT JOIN LATERAL (
        SELECT url FROM shop.product_images
        WHERE product_id = p.id
        ORDER BY position LIMIT 1
    ) img ON true
";

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All cart lines for a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let sql = format!("{CART_LINE_SELECT} WHERE ci.user_id = $1 ORDER BY ci.created_at");
        let lines = sqlx::query_as::<_, CartLine>(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        Ok(lines)
    }

    /// Add a line, folding duplicates into the existing row's quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails (including a
    /// foreign-key failure for an unknown product/variant).
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: ProductId,
        variant_id: Option<VariantId>,
        quantity: i32,
    ) -> Result<CartItemId, RepositoryError> {
        // variant_key collapses NULL variants so the unique index can treat
        // "no variant" as one slot per product.
        let (id,): (CartItemId,) = sqlx::query_as(
            r"
            INSERT INTO shop.cart_items (user_id, product_id, variant_id, quantity)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, product_id, variant_key) DO UPDATE
            SET quantity = shop.cart_items.quantity + EXCLUDED.quantity,
                updated_at = now()
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(variant_id)
        .bind(quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Set a line's quantity. The line must belong to the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line does not exist or is
    /// another user's.
    pub async fn set_quantity(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE shop.cart_items
            SET quantity = $3, updated_at = now()
            WHERE id = $2 AND user_id = $1
            ",
        )
        .bind(user_id)
        .bind(item_id)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Remove a line. The line must belong to the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line does not exist or is
    /// another user's.
    pub async fn remove(&self, user_id: UserId, item_id: CartItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM shop.cart_items
            WHERE id = $2 AND user_id = $1
            ",
        )
        .bind(user_id)
        .bind(item_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Remove every line in the user's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM shop.cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
