//! Homepage section repository (admin side: drafts included).

use serde_json::Value;
use sqlx::PgPool;

use velvet_loom_core::{SectionId, SectionType};

use super::RepositoryError;
use crate::models::Section;

const SECTION_COLUMNS: &str =
    "id, section_type, payload, position, published, created_at, updated_at";

/// Repository for homepage section management.
pub struct SectionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SectionRepository<'a> {
    /// Create a new section repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All sections in display order, drafts included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Section>, RepositoryError> {
        let sql = format!(
            "SELECT {SECTION_COLUMNS} FROM shop.sections ORDER BY position ASC, id ASC"
        );
        Ok(sqlx::query_as::<_, Section>(&sql)
            .fetch_all(self.pool)
            .await?)
    }

    /// One section by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the section does not exist.
    pub async fn get(&self, id: SectionId) -> Result<Section, RepositoryError> {
        let sql = format!("SELECT {SECTION_COLUMNS} FROM shop.sections WHERE id = $1");
        sqlx::query_as::<_, Section>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Create a draft section at the end of the current order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        section_type: SectionType,
        payload: &Value,
    ) -> Result<Section, RepositoryError> {
        let sql = format!(
            r"
            INSERT INTO shop.sections (section_type, payload, position, published)
            VALUES ($1, $2,
                    (SELECT COALESCE(MAX(position), 0) + 1 FROM shop.sections),
                    false)
            RETURNING {SECTION_COLUMNS}
            "
        );
        Ok(sqlx::query_as::<_, Section>(&sql)
            .bind(section_type)
            .bind(payload)
            .fetch_one(self.pool)
            .await?)
    }

    /// Update a section's payload and/or published flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the section does not exist.
    pub async fn update(
        &self,
        id: SectionId,
        payload: Option<&Value>,
        published: Option<bool>,
    ) -> Result<Section, RepositoryError> {
        let sql = format!(
            r"
            UPDATE shop.sections
            SET payload = COALESCE($2, payload),
                published = COALESCE($3, published),
                updated_at = now()
            WHERE id = $1
            RETURNING {SECTION_COLUMNS}
            "
        );
        sqlx::query_as::<_, Section>(&sql)
            .bind(id)
            .bind(payload)
            .bind(published)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Reassign positions to match the given id order. Ids not listed keep
    /// their positions.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn reorder(&self, ids: &[SectionId]) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        for (position, id) in ids.iter().enumerate() {
            sqlx::query(
                "UPDATE shop.sections SET position = $2, updated_at = now() WHERE id = $1",
            )
            .bind(id)
            .bind(i32::try_from(position).unwrap_or(i32::MAX) + 1)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Delete a section.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the section does not exist.
    pub async fn delete(&self, id: SectionId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.sections WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
