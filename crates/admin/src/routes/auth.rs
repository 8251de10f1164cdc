//! Sign-in and sign-out.
//!
//! Login exchanges an identity-provider token for a session. The subject
//! must already exist in `admin.admin_users`; a valid token for an unknown
//! subject is rejected, which is how access is granted and revoked.

use axum::{Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::AdminUserRepository;
use crate::error::{AppError, Result};
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Body for the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    /// Token issued by the identity provider.
    pub token: String,
}

/// POST /auth/login
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginBody>,
) -> Result<Json<CurrentAdmin>> {
    let profile = state.identity().verify_token(&body.token).await?;

    let admin = AdminUserRepository::new(state.pool())
        .get_by_subject(&profile.subject)
        .await?
        .ok_or_else(|| {
            tracing::warn!(subject = %profile.subject, "login attempt by unknown subject");
            AppError::Unauthorized("no back-office access for this account".to_string())
        })?;

    // Rotate the session id on privilege change.
    session.cycle_id().await?;

    let current = CurrentAdmin::from(&admin);
    set_current_admin(&session, &current).await?;

    tracing::info!(admin_id = %admin.id, role = ?admin.role, "admin signed in");
    Ok(Json(current))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>> {
    clear_current_admin(&session).await?;
    session.flush().await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// GET /auth/me
pub async fn me(
    crate::middleware::RequireAdmin(admin): crate::middleware::RequireAdmin,
) -> Json<CurrentAdmin> {
    Json(admin)
}
