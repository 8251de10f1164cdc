//! Wishlist route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use velvet_loom_core::{ProductId, WishlistItemId};

use crate::db::WishlistRepository;
use crate::error::Result;
use crate::middleware::RequireUser;
use crate::models::WishlistItem;
use crate::state::AppState;

/// Body for adding a wishlist entry.
#[derive(Debug, Deserialize)]
pub struct AddBody {
    pub product_id: ProductId,
}

/// GET /wishlist
pub async fn index(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<WishlistItem>>> {
    let items = WishlistRepository::new(state.pool()).items(user.id).await?;
    Ok(Json(items))
}

/// POST /wishlist
///
/// Duplicate adds return 409 via the unique constraint.
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<AddBody>,
) -> Result<(StatusCode, Json<Vec<WishlistItem>>)> {
    let repo = WishlistRepository::new(state.pool());
    repo.add(user.id, body.product_id).await?;
    let items = repo.items(user.id).await?;
    Ok((StatusCode::CREATED, Json(items)))
}

/// DELETE /wishlist/{id}
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(item_id): Path<WishlistItemId>,
) -> Result<StatusCode> {
    WishlistRepository::new(state.pool())
        .remove(user.id, item_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
