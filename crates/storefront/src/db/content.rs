//! Homepage content repository. Only published sections are visible here;
//! the back office owns creation and ordering.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::Section;

/// Repository for published homepage sections.
pub struct SectionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SectionRepository<'a> {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Published sections in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn published_sections(&self) -> Result<Vec<Section>, RepositoryError> {
        let sections = sqlx::query_as::<_, Section>(
            r"
            SELECT id, section_type, payload, position
            FROM shop.sections
            WHERE published
            ORDER BY position ASC, id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(sections)
    }
}
