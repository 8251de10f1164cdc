//! Homepage route handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::db::SectionRepository;
use crate::error::Result;
use crate::models::Section;
use crate::state::AppState;

/// Homepage response: published section elements in display order.
#[derive(Serialize)]
pub struct HomeResponse {
    pub sections: Vec<Section>,
}

/// GET /home
///
/// The client renders each section from its type and JSON payload; unknown
/// types should be skipped client-side so old apps survive new section types.
/// The layout is served from a short-lived cache, so edits in the back office
/// can take up to a minute to appear.
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeResponse>> {
    if let Some(sections) = state.section_cache().get(&()).await {
        return Ok(Json(HomeResponse { sections }));
    }

    let sections = SectionRepository::new(state.pool())
        .published_sections()
        .await?;
    state.section_cache().insert((), sections.clone()).await;
    Ok(Json(HomeResponse { sections }))
}
