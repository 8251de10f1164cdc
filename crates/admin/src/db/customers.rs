//! Customer repository (read-only; profiles belong to the storefront).

use sqlx::PgPool;

use velvet_loom_core::UserId;

use super::RepositoryError;
use crate::models::{Customer, CustomerAddress};

const CUSTOMER_SELECT: &str = r"
    SELECT u.id, u.email, u.name, u.phone, u.created_at,
           COUNT(o.id) AS order_count,
           COALESCE(SUM(o.total) FILTER (WHERE o.payment_status = 'PAID'), 0) AS total_spent
    FROM shop.users u
    LEFT JOIN shop.orders o ON o.user_id = u.id
";

/// Repository for customer reads.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Customers with order aggregates, newest first. `search` matches
    /// email or name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Customer>, RepositoryError> {
        let sql = format!(
            r"
            {CUSTOMER_SELECT}
            WHERE ($1::text IS NULL
                   OR u.email ILIKE '%' || $1 || '%'
                   OR u.name ILIKE '%' || $1 || '%')
            GROUP BY u.id
            ORDER BY u.created_at DESC
            LIMIT $2 OFFSET $3
            "
        );
        let customers = sqlx::query_as::<_, Customer>(&sql)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        Ok(customers)
    }

    /// One customer with order aggregates.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer does not exist.
    pub async fn get(&self, user_id: UserId) -> Result<Customer, RepositoryError> {
        let sql = format!("{CUSTOMER_SELECT} WHERE u.id = $1 GROUP BY u.id");
        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(customer)
    }

    /// A customer's saved addresses, default first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn addresses(&self, user_id: UserId) -> Result<Vec<CustomerAddress>, RepositoryError> {
        let addresses = sqlx::query_as::<_, CustomerAddress>(
            r"
            SELECT id, label, recipient, phone, line1, line2,
                   city, state, postal_code, country, is_default
            FROM shop.addresses
            WHERE user_id = $1
            ORDER BY is_default DESC, created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(addresses)
    }
}
