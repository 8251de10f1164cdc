//! Admin user repository.

use sqlx::PgPool;

use velvet_loom_core::{AdminRole, AdminUserId, Email};

use super::RepositoryError;
use crate::models::AdminUser;

const ADMIN_USER_COLUMNS: &str = "id, subject, email, name, role, created_at, updated_at";

/// Repository for admin user operations.
pub struct AdminUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminUserRepository<'a> {
    /// Create a new admin user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All admin users, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<AdminUser>, RepositoryError> {
        let sql = format!(
            "SELECT {ADMIN_USER_COLUMNS} FROM admin.admin_users ORDER BY created_at DESC"
        );
        let users = sqlx::query_as::<_, AdminUser>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(users)
    }

    /// Look up an admin by identity provider subject.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_subject(
        &self,
        subject: &str,
    ) -> Result<Option<AdminUser>, RepositoryError> {
        let sql = format!("SELECT {ADMIN_USER_COLUMNS} FROM admin.admin_users WHERE subject = $1");
        let user = sqlx::query_as::<_, AdminUser>(&sql)
            .bind(subject)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Create an admin user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the subject or email is taken.
    pub async fn create(
        &self,
        subject: &str,
        email: &Email,
        name: &str,
        role: AdminRole,
    ) -> Result<AdminUser, RepositoryError> {
        let sql = format!(
            "INSERT INTO admin.admin_users (subject, email, name, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {ADMIN_USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, AdminUser>(&sql)
            .bind(subject)
            .bind(email)
            .bind(name)
            .bind(role)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_unique_violation(e, "admin user already exists")
            })?;

        Ok(user)
    }

    /// Change an admin's role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the admin does not exist.
    pub async fn set_role(
        &self,
        id: AdminUserId,
        role: AdminRole,
    ) -> Result<AdminUser, RepositoryError> {
        let sql = format!(
            "UPDATE admin.admin_users SET role = $2, updated_at = now()
             WHERE id = $1
             RETURNING {ADMIN_USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, AdminUser>(&sql)
            .bind(id)
            .bind(role)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(user)
    }

    /// Delete an admin user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the admin does not exist.
    pub async fn delete(&self, id: AdminUserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM admin.admin_users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
