//! Collection repository: curated product groupings shown on the storefront.

use sqlx::PgPool;

use velvet_loom_core::{CollectionId, ProductId};

use super::RepositoryError;
use crate::models::{Collection, Product};

const COLLECTION_COLUMNS: &str = "id, slug, title, description, image_url, created_at";

/// Fields for creating or updating a collection.
#[derive(Debug, Clone)]
pub struct CollectionInput {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Repository for collection management.
pub struct CollectionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CollectionRepository<'a> {
    /// Create a new collection repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All collections, alphabetical by title.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Collection>, RepositoryError> {
        let sql = format!("SELECT {COLLECTION_COLUMNS} FROM shop.collections ORDER BY title");
        Ok(sqlx::query_as::<_, Collection>(&sql)
            .fetch_all(self.pool)
            .await?)
    }

    /// One collection by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the collection does not exist.
    pub async fn get(&self, id: CollectionId) -> Result<Collection, RepositoryError> {
        let sql = format!("SELECT {COLLECTION_COLUMNS} FROM shop.collections WHERE id = $1");
        sqlx::query_as::<_, Collection>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Products assigned to a collection, in assignment order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn products(&self, id: CollectionId) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT p.id, p.slug, p.title, p.description, p.price,
                   p.compare_at_price, p.archived_at, p.created_at, p.updated_at
            FROM shop.products p
            JOIN shop.product_collections pc ON pc.product_id = p.id
            WHERE pc.collection_id = $1
            ORDER BY pc.position, p.id
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Create a collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is taken.
    pub async fn create(&self, input: &CollectionInput) -> Result<Collection, RepositoryError> {
        let sql = format!(
            r"
            INSERT INTO shop.collections (slug, title, description, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLLECTION_COLUMNS}
            "
        );
        sqlx::query_as::<_, Collection>(&sql)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(input.description.as_deref())
            .bind(input.image_url.as_deref())
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_unique_violation(
                    e,
                    "a collection with this slug already exists",
                )
            })
    }

    /// Update a collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the collection does not exist,
    /// or `RepositoryError::Conflict` if the new slug is taken.
    pub async fn update(
        &self,
        id: CollectionId,
        input: &CollectionInput,
    ) -> Result<Collection, RepositoryError> {
        let sql = format!(
            r"
            UPDATE shop.collections
            SET slug = $2, title = $3, description = $4, image_url = $5
            WHERE id = $1
            RETURNING {COLLECTION_COLUMNS}
            "
        );
        sqlx::query_as::<_, Collection>(&sql)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(input.description.as_deref())
            .bind(input.image_url.as_deref())
            .fetch_optional(self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_unique_violation(
                    e,
                    "a collection with this slug already exists",
                )
            })?
            .ok_or(RepositoryError::NotFound)
    }

    /// Replace the collection's product membership with the given ordered
    /// list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the collection does not exist.
    pub async fn set_products(
        &self,
        id: CollectionId,
        product_ids: &[ProductId],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<(i32,)> =
            sqlx::query_as("SELECT 1 FROM shop.collections WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Err(RepositoryError::NotFound);
        }

        sqlx::query("DELETE FROM shop.product_collections WHERE collection_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for (position, product_id) in product_ids.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO shop.product_collections (collection_id, product_id, position)
                VALUES ($1, $2, $3)
                ",
            )
            .bind(id)
            .bind(product_id)
            .bind(i32::try_from(position).unwrap_or(i32::MAX))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete a collection; membership rows go with it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the collection does not exist.
    pub async fn delete(&self, id: CollectionId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.collections WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
