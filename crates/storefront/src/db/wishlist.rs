//! Wishlist repository.
//!
//! One row per user/product, enforced by a unique constraint.

use sqlx::PgPool;

use velvet_loom_core::{ProductId, UserId, WishlistItemId};

use super::RepositoryError;
use crate::models::WishlistItem;

/// Repository for wishlist operations.
pub struct WishlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All wishlist items for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, user_id: UserId) -> Result<Vec<WishlistItem>, RepositoryError> {
        let items = sqlx::query_as::<_, WishlistItem>(
            r"
            SELECT wi.id, wi.product_id, p.slug, p.title, p.price,
                   img.url AS image_url, wi.created_at
            FROM shop.wishlist_items wi
            JOIN shop.products p ON p.id = wi.product_id
            LEFT JOIN LATERAL (
                SELECT url FROM shop.product_images
                WHERE product_id = p.id
                ORDER BY position LIMIT 1
            ) img ON true
            WHERE wi.user_id = $1
            ORDER BY wi.created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Whether a product is on the user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn contains(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let (exists,): (bool,) = sqlx::query_as(
            r"
            SELECT EXISTS (
                SELECT 1 FROM shop.wishlist_items
                WHERE user_id = $1 AND product_id = $2
            )
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Add a product to the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product is already listed.
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<WishlistItemId, RepositoryError> {
        let (id,): (WishlistItemId,) = sqlx::query_as(
            r"
            INSERT INTO shop.wishlist_items (user_id, product_id)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_unique_violation(e, "product already in wishlist"))?;

        Ok(id)
    }

    /// Remove a wishlist item. The item must belong to the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist or is
    /// another user's.
    pub async fn remove(
        &self,
        user_id: UserId,
        item_id: WishlistItemId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM shop.wishlist_items
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
}
