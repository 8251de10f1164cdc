//! Database migration commands.
//!
//! Neither binary runs migrations at startup; deploys run these commands
//! explicitly. The `shop` schema belongs to the storefront migration set,
//! the `admin` schema to the admin set. Both sets usually target the same
//! database and share its `_sqlx_migrations` table, so their version
//! numbers must not collide across the two directories.

use super::{CommandError, connect};

/// Run storefront (shop schema) migrations.
///
/// # Errors
///
/// Returns `CommandError` if connecting or migrating fails.
pub async fn storefront() -> Result<(), CommandError> {
    let pool = connect("STOREFRONT_DATABASE_URL").await?;

    tracing::info!("Running storefront migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    tracing::info!("Storefront migrations complete");
    Ok(())
}

/// Run admin schema migrations.
///
/// # Errors
///
/// Returns `CommandError` if connecting or migrating fails.
pub async fn admin() -> Result<(), CommandError> {
    let pool = connect("ADMIN_DATABASE_URL").await?;

    tracing::info!("Running admin migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    tracing::info!("Admin migrations complete");
    Ok(())
}
