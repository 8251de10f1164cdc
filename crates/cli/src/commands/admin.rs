//! Admin user management commands.
//!
//! Admins sign in through the identity provider; the `subject` argument is
//! the provider's stable identifier for the account. Creating the row here
//! is what grants back-office access.

use velvet_loom_core::AdminRole;

use super::{CommandError, connect};

/// Create a new admin user.
///
/// # Errors
///
/// Returns `CommandError::Invalid` for a bad role or email, or a database
/// error if the insert fails (including duplicates).
pub async fn create_user(
    subject: &str,
    email: &str,
    name: &str,
    role: &str,
) -> Result<i32, CommandError> {
    let role: AdminRole = role.parse().map_err(|_| {
        CommandError::Invalid(format!(
            "invalid role: {role}. Valid roles: super_admin, admin, viewer"
        ))
    })?;

    if !email.contains('@') || !email.contains('.') {
        return Err(CommandError::Invalid(format!("invalid email: {email}")));
    }
    if subject.trim().is_empty() {
        return Err(CommandError::Invalid("subject must not be empty".into()));
    }

    let pool = connect("ADMIN_DATABASE_URL").await?;

    tracing::info!("Creating admin user: {} ({})", email, role);

    let existing: Option<(i32,)> = sqlx::query_as(
        "SELECT id FROM admin.admin_users WHERE subject = $1 OR email = $2",
    )
    .bind(subject)
    .bind(email)
    .fetch_optional(&pool)
    .await?;

    if existing.is_some() {
        return Err(CommandError::Invalid(format!(
            "admin user already exists for {email}"
        )));
    }

    let (user_id,): (i32,) = sqlx::query_as(
        r"
        INSERT INTO admin.admin_users (subject, email, name, role)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        ",
    )
    .bind(subject)
    .bind(email)
    .bind(name)
    .bind(role)
    .fetch_one(&pool)
    .await?;

    tracing::info!(
        "Admin user created. ID: {}, Email: {}, Role: {}",
        user_id,
        email,
        role
    );

    Ok(user_id)
}
