//! Homepage content editor.
//!
//! Sections are created as drafts and published with a flag flip. Payloads
//! are validated per section type before any write; a failing payload
//! returns 400 naming the offending field.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use velvet_loom_core::{SectionId, SectionType};

use crate::db::SectionRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::Section;
use crate::state::AppState;

/// GET /api/content/sections
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Section>>> {
    let sections = SectionRepository::new(state.pool()).list().await?;
    Ok(Json(sections))
}

/// Body for section creation.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
    pub section_type: SectionType,
    pub payload: Value,
}

/// POST /api/content/sections
#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(body): Json<CreateBody>,
) -> Result<(StatusCode, Json<Section>)> {
    body.section_type
        .validate_payload(&body.payload)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let section = SectionRepository::new(state.pool())
        .create(body.section_type, &body.payload)
        .await?;

    tracing::info!(section_id = %section.id, section_type = ?section.section_type, "section created");
    Ok((StatusCode::CREATED, Json(section)))
}

/// Body for section update; both fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    pub payload: Option<Value>,
    pub published: Option<bool>,
}

/// PATCH /api/content/sections/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(section_id): Path<SectionId>,
    Json(body): Json<UpdateBody>,
) -> Result<Json<Section>> {
    let repo = SectionRepository::new(state.pool());

    // A new payload is validated against the section's existing type.
    if let Some(payload) = &body.payload {
        let existing = repo.get(section_id).await?;
        existing
            .section_type
            .validate_payload(payload)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
    }

    let section = repo
        .update(section_id, body.payload.as_ref(), body.published)
        .await?;
    Ok(Json(section))
}

/// Body for the reorder endpoint: section ids in display order.
#[derive(Debug, Deserialize)]
pub struct ReorderBody {
    pub section_ids: Vec<SectionId>,
}

/// POST /api/content/sections/reorder
pub async fn reorder(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<ReorderBody>,
) -> Result<Json<Vec<Section>>> {
    let repo = SectionRepository::new(state.pool());
    repo.reorder(&body.section_ids).await?;
    let sections = repo.list().await?;
    Ok(Json(sections))
}

/// DELETE /api/content/sections/{id}
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn destroy(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(section_id): Path<SectionId>,
) -> Result<StatusCode> {
    SectionRepository::new(state.pool()).delete(section_id).await?;
    tracing::info!(%section_id, "section deleted");
    Ok(StatusCode::NO_CONTENT)
}
