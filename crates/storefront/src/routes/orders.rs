//! Order history route handlers.
//!
//! Customers see their own orders only. Cancellation is a request, not an
//! immediate state change; the back office approves or rejects it.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use velvet_loom_core::OrderId;

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{Order, OrderWithItems};
use crate::state::AppState;

/// Body for a cancellation request.
#[derive(Debug, Default, Deserialize)]
pub struct CancelBody {
    pub reason: Option<String>,
}

/// GET /orders
pub async fn index(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(orders))
}

/// GET /orders/{id}
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(order_id): Path<OrderId>,
) -> Result<Json<OrderWithItems>> {
    let order = OrderRepository::new(state.pool())
        .get_for_user(user.id, order_id)
        .await?
        .ok_or_else(|| AppError::NotFound("order".to_string()))?;
    Ok(Json(order))
}

/// POST /orders/{id}/cancel
///
/// Only PENDING or PROCESSING orders with no existing request are eligible;
/// anything else (shipped, already requested, decided) returns 409.
#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn request_cancellation(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(order_id): Path<OrderId>,
    Json(body): Json<CancelBody>,
) -> Result<(StatusCode, Json<Order>)> {
    let repo = OrderRepository::new(state.pool());

    // Distinguish "no such order" from "order not eligible" for the client.
    let existing = repo
        .get_for_user(user.id, order_id)
        .await?
        .ok_or_else(|| AppError::NotFound("order".to_string()))?;

    let order = repo
        .request_cancellation(user.id, order_id, body.reason.as_deref())
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => AppError::Conflict(format!(
                "order {} is not eligible for cancellation",
                existing.order.order_number
            )),
            other => other.into(),
        })?;

    Ok((StatusCode::ACCEPTED, Json(order)))
}
