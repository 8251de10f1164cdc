//! Cart route handlers.
//!
//! The cart is server-side and keyed by the authenticated user, so it follows
//! the customer across devices. Duplicate adds fold into the existing line.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use velvet_loom_core::{CartItemId, ProductId, VariantId};

use crate::db::CartRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::CartView;
use crate::state::AppState;

/// Largest quantity a single line accepts.
const MAX_LINE_QUANTITY: i32 = 20;

/// Body for adding a cart line.
#[derive(Debug, Deserialize)]
pub struct AddItemBody {
    pub product_id: ProductId,
    pub variant_id: Option<VariantId>,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

const fn default_quantity() -> i32 {
    1
}

/// Body for changing a line's quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateItemBody {
    pub quantity: i32,
}

fn validate_quantity(quantity: i32) -> Result<()> {
    if !(1..=MAX_LINE_QUANTITY).contains(&quantity) {
        return Err(AppError::BadRequest(format!(
            "quantity must be between 1 and {MAX_LINE_QUANTITY}"
        )));
    }
    Ok(())
}

async fn cart_view(state: &AppState, user_id: velvet_loom_core::UserId) -> Result<CartView> {
    let lines = CartRepository::new(state.pool()).lines(user_id).await?;
    Ok(CartView::from_lines(lines))
}

/// GET /cart
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<CartView>> {
    Ok(Json(cart_view(&state, user.id).await?))
}

/// POST /cart/items
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn add_item(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<AddItemBody>,
) -> Result<(StatusCode, Json<CartView>)> {
    validate_quantity(body.quantity)?;

    CartRepository::new(state.pool())
        .add(user.id, body.product_id, body.variant_id, body.quantity)
        .await?;

    Ok((StatusCode::CREATED, Json(cart_view(&state, user.id).await?)))
}

/// PATCH /cart/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(item_id): Path<CartItemId>,
    Json(body): Json<UpdateItemBody>,
) -> Result<Json<CartView>> {
    validate_quantity(body.quantity)?;

    CartRepository::new(state.pool())
        .set_quantity(user.id, item_id, body.quantity)
        .await?;

    Ok(Json(cart_view(&state, user.id).await?))
}

/// DELETE /cart/items/{id}
pub async fn remove_item(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(item_id): Path<CartItemId>,
) -> Result<Json<CartView>> {
    CartRepository::new(state.pool())
        .remove(user.id, item_id)
        .await?;

    Ok(Json(cart_view(&state, user.id).await?))
}

/// DELETE /cart
pub async fn clear(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<CartView>> {
    CartRepository::new(state.pool()).clear(user.id).await?;
    Ok(Json(CartView::empty()))
}
