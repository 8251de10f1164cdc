//! Database operations for the storefront.
//!
//! # Schema: `shop`
//!
//! The storefront and admin binaries share one `PostgreSQL` database. The
//! storefront owns the `shop` schema:
//!
//! - `users` - local profile rows keyed by the identity provider subject
//! - `addresses` - shipping/billing addresses (single default per user)
//! - `products`, `product_variants`, `product_images` - catalog
//! - `collections`, `product_collections` - curated groupings
//! - `cart_items` - one row per user/product/variant (unique)
//! - `wishlist_items` - one row per user/product (unique)
//! - `orders`, `order_items` - orders with product snapshots
//! - `reviews` - one review per user/product (unique)
//! - `sections` - homepage content elements (JSON payloads)
//!
//! # Migrations
//!
//! Migrations live in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p velvet-loom-cli -- migrate storefront
//! ```
//!
//! All queries are runtime-bound (`sqlx::query_as::<_, T>`) with
//! `#[derive(sqlx::FromRow)]` model structs, so the workspace compiles
//! without a live database.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod addresses;
pub mod cart;
pub mod collections;
pub mod content;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;
pub mod wishlist;

pub use addresses::AddressRepository;
pub use cart::CartRepository;
pub use collections::CollectionRepository;
pub use content::SectionRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use reviews::ReviewRepository;
pub use users::UserRepository;
pub use wishlist::WishlistRepository;

/// Errors from the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate review).
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
