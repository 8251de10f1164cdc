//! Collection management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use velvet_loom_core::{CollectionId, ProductId};

use crate::db::{CollectionRepository, collections::CollectionInput};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Collection, Product};
use crate::state::AppState;

/// GET /api/collections
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Collection>>> {
    let collections = CollectionRepository::new(state.pool()).list().await?;
    Ok(Json(collections))
}

/// Response for the collection detail endpoint.
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    #[serde(flatten)]
    pub collection: Collection,
    pub products: Vec<Product>,
}

/// GET /api/collections/{id}
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(collection_id): Path<CollectionId>,
) -> Result<Json<DetailResponse>> {
    let repo = CollectionRepository::new(state.pool());
    let collection = repo.get(collection_id).await?;
    let products = repo.products(collection_id).await?;

    Ok(Json(DetailResponse {
        collection,
        products,
    }))
}

/// Body for collection creation and update.
#[derive(Debug, Deserialize)]
pub struct CollectionBody {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl CollectionBody {
    fn into_input(self) -> Result<CollectionInput> {
        if self.slug.trim().is_empty() || self.title.trim().is_empty() {
            return Err(AppError::BadRequest(
                "slug and title are required".to_string(),
            ));
        }
        Ok(CollectionInput {
            slug: self.slug,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
        })
    }
}

/// POST /api/collections
#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(body): Json<CollectionBody>,
) -> Result<(StatusCode, Json<Collection>)> {
    let collection = CollectionRepository::new(state.pool())
        .create(&body.into_input()?)
        .await?;
    tracing::info!(collection_id = %collection.id, "collection created");
    Ok((StatusCode::CREATED, Json(collection)))
}

/// PATCH /api/collections/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(collection_id): Path<CollectionId>,
    Json(body): Json<CollectionBody>,
) -> Result<Json<Collection>> {
    let collection = CollectionRepository::new(state.pool())
        .update(collection_id, &body.into_input()?)
        .await?;
    Ok(Json(collection))
}

/// Body for the membership endpoint: ordered product ids.
#[derive(Debug, Deserialize)]
pub struct MembershipBody {
    pub product_ids: Vec<ProductId>,
}

/// PUT /api/collections/{id}/products
pub async fn set_products(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(collection_id): Path<CollectionId>,
    Json(body): Json<MembershipBody>,
) -> Result<Json<Vec<Product>>> {
    let repo = CollectionRepository::new(state.pool());
    repo.set_products(collection_id, &body.product_ids).await?;
    let products = repo.products(collection_id).await?;
    Ok(Json(products))
}

/// DELETE /api/collections/{id}
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn destroy(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(collection_id): Path<CollectionId>,
) -> Result<StatusCode> {
    CollectionRepository::new(state.pool())
        .delete(collection_id)
        .await?;
    tracing::info!(%collection_id, "collection deleted");
    Ok(StatusCode::NO_CONTENT)
}
