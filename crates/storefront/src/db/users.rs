//! User repository.
//!
//! Users are keyed by the identity provider subject. The first authenticated
//! request upserts the local profile row.

use sqlx::PgPool;

use velvet_loom_core::{Email, UserId};

use super::RepositoryError;
use crate::models::User;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by internal id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, subject, email, name, phone, created_at, updated_at
            FROM shop.users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Upsert a user by identity provider subject, refreshing the email and
    /// name reported by the provider.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_by_subject(
        &self,
        subject: &str,
        email: &Email,
        name: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            INSERT INTO shop.users (subject, email, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (subject) DO UPDATE
            SET email = EXCLUDED.email,
                name = COALESCE(EXCLUDED.name, shop.users.name),
                updated_at = now()
            RETURNING id, subject, email, name, phone, created_at, updated_at
            ",
        )
        .bind(subject)
        .bind(email)
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// Update the profile fields a user may edit locally.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user does not exist.
    pub async fn update_profile(
        &self,
        id: UserId,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            UPDATE shop.users
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                updated_at = now()
            WHERE id = $1
            RETURNING id, subject, email, name, phone, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(user)
    }
}
