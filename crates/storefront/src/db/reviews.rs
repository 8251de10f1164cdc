//! Product review repository.

use sqlx::PgPool;

use velvet_loom_core::{ProductId, UserId};

use super::RepositoryError;
use crate::models::{Review, ReviewSummary};

const REVIEW_COLUMNS: &str = "id, product_id, user_id, author_name, rating, comment, created_at";

/// Repository for review operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reviews for a product, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn for_product(
        &self,
        product_id: ProductId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>, RepositoryError> {
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM shop.reviews
             WHERE product_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        let reviews = sqlx::query_as::<_, Review>(&sql)
            .bind(product_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        Ok(reviews)
    }

    /// Review count and average rating for a product.
    ///
    /// `average_rating` is `None` when the product has no reviews.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn summary(&self, product_id: ProductId) -> Result<ReviewSummary, RepositoryError> {
        let summary = sqlx::query_as::<_, ReviewSummary>(
            r"
            SELECT COUNT(*) AS review_count,
                   AVG(rating)::float8 AS average_rating
            FROM shop.reviews
            WHERE product_id = $1
            ",
        )
        .bind(product_id)
        .fetch_one(self.pool)
        .await?;

        Ok(summary)
    }

    /// Create a review. One review per user per product; the author name is
    /// snapshotted so later profile edits do not rewrite history.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already reviewed the
    /// product.
    pub async fn create(
        &self,
        product_id: ProductId,
        user_id: UserId,
        author_name: &str,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<Review, RepositoryError> {
        let sql = format!(
            "INSERT INTO shop.reviews (product_id, user_id, author_name, rating, comment)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {REVIEW_COLUMNS}"
        );
        let review = sqlx::query_as::<_, Review>(&sql)
            .bind(product_id)
            .bind(user_id)
            .bind(author_name)
            .bind(rating)
            .bind(comment)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_unique_violation(e, "you have already reviewed this product")
            })?;

        Ok(review)
    }
}
