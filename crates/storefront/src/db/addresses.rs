//! Address repository.
//!
//! Each user has at most one default address; `set_default` clears the flag
//! and sets the new one inside a transaction.

use sqlx::PgPool;

use velvet_loom_core::{AddressId, UserId};

use super::RepositoryError;
use crate::models::Address;

/// Fields of a new or updated address.
#[derive(Debug, Clone)]
pub struct AddressInput {
    pub label: Option<String>,
    pub recipient: String,
    pub phone: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

const ADDRESS_COLUMNS: &str = "id, user_id, label, recipient, phone, line1, line2, city, state, \
                               postal_code, country, is_default, created_at, updated_at";

/// Repository for address operations.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All addresses for a user, default first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Address>, RepositoryError> {
        let sql = format!(
            "SELECT {ADDRESS_COLUMNS} FROM shop.addresses
             WHERE user_id = $1
             ORDER BY is_default DESC, created_at DESC"
        );
        let addresses = sqlx::query_as::<_, Address>(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        Ok(addresses)
    }

    /// Get one of the user's addresses.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        user_id: UserId,
        address_id: AddressId,
    ) -> Result<Option<Address>, RepositoryError> {
        let sql =
            format!("SELECT {ADDRESS_COLUMNS} FROM shop.addresses WHERE id = $1 AND user_id = $2");
        let address = sqlx::query_as::<_, Address>(&sql)
            .bind(address_id)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(address)
    }

    /// Create an address. The user's first address becomes the default.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        user_id: UserId,
        input: &AddressInput,
    ) -> Result<Address, RepositoryError> {
        let sql = format!(
            r"
            INSERT INTO shop.addresses (
                user_id, label, recipient, phone, line1, line2,
                city, state, postal_code, country, is_default
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    NOT EXISTS (SELECT 1 FROM shop.addresses WHERE user_id = $1))
            RETURNING {ADDRESS_COLUMNS}
            "
        );
        let address = sqlx::query_as::<_, Address>(&sql)
            .bind(user_id)
            .bind(&input.label)
            .bind(&input.recipient)
            .bind(&input.phone)
            .bind(&input.line1)
            .bind(&input.line2)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.postal_code)
            .bind(&input.country)
            .fetch_one(self.pool)
            .await?;

        Ok(address)
    }

    /// Update one of the user's addresses.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address does not exist or
    /// is another user's.
    pub async fn update(
        &self,
        user_id: UserId,
        address_id: AddressId,
        input: &AddressInput,
    ) -> Result<Address, RepositoryError> {
        let sql = format!(
            r"
            UPDATE shop.addresses
            SET label = $3, recipient = $4, phone = $5, line1 = $6, line2 = $7,
                city = $8, state = $9, postal_code = $10, country = $11,
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING {ADDRESS_COLUMNS}
            "
        );
        let address = sqlx::query_as::<_, Address>(&sql)
            .bind(address_id)
            .bind(user_id)
            .bind(&input.label)
            .bind(&input.recipient)
            .bind(&input.phone)
            .bind(&input.line1)
            .bind(&input.line2)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.postal_code)
            .bind(&input.country)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(address)
    }

    /// Delete one of the user's addresses.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address does not exist or
    /// is another user's.
    pub async fn delete(
        &self,
        user_id: UserId,
        address_id: AddressId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.addresses WHERE id = $1 AND user_id = $2")
            .bind(address_id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Make an address the user's single default (clear-then-set, one
    /// transaction).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address does not exist or
    /// is another user's; the transaction rolls back.
    pub async fn set_default(
        &self,
        user_id: UserId,
        address_id: AddressId,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE shop.addresses SET is_default = false WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(
            r"
            UPDATE shop.addresses
            SET is_default = true, updated_at = now()
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(address_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Roll back the clear as well.
            tx.rollback().await?;
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }
}
