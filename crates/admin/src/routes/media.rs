//! Media endpoints: signed-upload parameters and asset deletion.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::services::media::{MediaError, UploadSignature};
use crate::state::AppState;

/// Folders the back office may upload into.
const ALLOWED_FOLDERS: &[&str] = &["products", "collections", "sections"];

/// Body for the signature endpoint.
#[derive(Debug, Deserialize)]
pub struct SignatureBody {
    pub folder: String,
}

/// POST /api/media/signature
pub async fn signature(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<SignatureBody>,
) -> Result<Json<UploadSignature>> {
    if !ALLOWED_FOLDERS.contains(&body.folder.as_str()) {
        return Err(AppError::BadRequest(format!(
            "unknown upload folder: {}",
            body.folder
        )));
    }

    Ok(Json(state.media().upload_signature(&body.folder)))
}

/// Body for the asset deletion endpoint.
#[derive(Debug, Deserialize)]
pub struct DeleteBody {
    pub public_id: String,
}

/// DELETE /api/media
#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn destroy(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(body): Json<DeleteBody>,
) -> Result<StatusCode> {
    if body.public_id.trim().is_empty() {
        return Err(AppError::BadRequest("public_id is required".to_string()));
    }

    state
        .media()
        .delete_asset(&body.public_id)
        .await
        .map_err(|e| match e {
            MediaError::Api { status: 404, .. } => {
                AppError::NotFound("media asset".to_string())
            }
            other => AppError::Internal(other.to_string()),
        })?;

    tracing::info!(public_id = %body.public_id, "media asset deleted");
    Ok(StatusCode::NO_CONTENT)
}
