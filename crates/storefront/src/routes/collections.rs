//! Collection route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use crate::db::CollectionRepository;
use crate::db::ProductRepository;
use crate::db::products::ProductFilter;
use crate::error::{AppError, Result};
use crate::models::{Collection, Product};
use crate::state::AppState;

/// How many products a collection detail page carries.
const COLLECTION_PAGE_SIZE: i64 = 48;

/// Collection detail response.
#[derive(Serialize)]
pub struct DetailResponse {
    #[serde(flatten)]
    pub collection: Collection,
    pub products: Vec<Product>,
}

/// GET /collections
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Collection>>> {
    let collections = CollectionRepository::new(state.pool()).list().await?;
    Ok(Json(collections))
}

/// GET /collections/{slug}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DetailResponse>> {
    let collection = CollectionRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("collection '{slug}'")))?;

    let filter = ProductFilter {
        collection_slug: Some(slug),
        limit: COLLECTION_PAGE_SIZE,
        ..ProductFilter::default()
    };
    let products = ProductRepository::new(state.pool()).list(&filter).await?;

    Ok(Json(DetailResponse {
        collection,
        products,
    }))
}
