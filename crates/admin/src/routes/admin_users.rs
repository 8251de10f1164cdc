//! Back-office user management. Super-admin only.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use velvet_loom_core::{AdminRole, AdminUserId, Email};

use crate::db::AdminUserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireSuperAdmin;
use crate::models::AdminUser;
use crate::state::AppState;

/// GET /api/admin-users
pub async fn index(
    State(state): State<AppState>,
    RequireSuperAdmin(_admin): RequireSuperAdmin,
) -> Result<Json<Vec<AdminUser>>> {
    let users = AdminUserRepository::new(state.pool()).list().await?;
    Ok(Json(users))
}

/// Body for admin user creation.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
    /// Identity provider subject for the new admin.
    pub subject: String,
    pub email: String,
    pub name: String,
    pub role: AdminRole,
}

/// POST /api/admin-users
#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Json(body): Json<CreateBody>,
) -> Result<(StatusCode, Json<AdminUser>)> {
    if body.subject.trim().is_empty() || body.name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "subject and name are required".to_string(),
        ));
    }
    let email = Email::parse(&body.email)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = AdminUserRepository::new(state.pool())
        .create(&body.subject, &email, &body.name, body.role)
        .await?;

    tracing::info!(admin_user_id = %user.id, role = ?user.role, "admin user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Body for the role endpoint.
#[derive(Debug, Deserialize)]
pub struct RoleBody {
    pub role: AdminRole,
}

/// PATCH /api/admin-users/{id}/role
#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn set_role(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(user_id): Path<AdminUserId>,
    Json(body): Json<RoleBody>,
) -> Result<Json<AdminUser>> {
    if user_id == admin.id {
        return Err(AppError::BadRequest(
            "cannot change your own role".to_string(),
        ));
    }

    let user = AdminUserRepository::new(state.pool())
        .set_role(user_id, body.role)
        .await?;
    Ok(Json(user))
}

/// DELETE /api/admin-users/{id}
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn destroy(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(user_id): Path<AdminUserId>,
) -> Result<StatusCode> {
    if user_id == admin.id {
        return Err(AppError::BadRequest(
            "cannot remove your own account".to_string(),
        ));
    }

    AdminUserRepository::new(state.pool()).delete(user_id).await?;
    tracing::info!(admin_user_id = %user_id, "admin user removed");
    Ok(StatusCode::NO_CONTENT)
}
