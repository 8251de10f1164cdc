//! Database operations for the admin back office.
//!
//! # Schemas
//!
//! The admin binary reads and writes the `shop` schema (orders, catalog,
//! content, customers) and owns the `admin` schema:
//!
//! - `admin.admin_users` - back-office users keyed by identity subject
//! - `admin.session` - tower-sessions storage
//!
//! `admin` schema migrations live in `crates/admin/migrations/`; `shop`
//! belongs to the storefront crate's migrations.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod admin_users;
pub mod collections;
pub mod content;
pub mod customers;
pub mod orders;
pub mod products;
pub mod reports;

pub use admin_users::AdminUserRepository;
pub use collections::CollectionRepository;
pub use content::SectionRepository;
pub use customers::CustomerRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use reports::ReportRepository;

/// Errors from the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint or state violation (e.g., bad status transition).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a unique-violation database error to `Conflict`, everything else
    /// to `Database`.
    pub(crate) fn from_unique_violation(err: sqlx::Error, conflict_msg: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict_msg.to_owned());
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
