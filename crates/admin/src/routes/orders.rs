//! Order management: listing, status transitions, cancellation decisions,
//! and invoice rendering.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use velvet_loom_core::{CancellationStatus, OrderId, OrderStatus};

use crate::db::{OrderRepository, orders::OrderFilter};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{AdminOrder, AdminOrderDetail};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 25;
const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for the order listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<OrderStatus>,
    pub cancellation_status: Option<CancellationStatus>,
    /// Substring match on order number or customer email.
    pub q: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// GET /api/orders
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<AdminOrder>>> {
    let per_page = params
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let page = params.page.unwrap_or(1).max(1);

    let orders = OrderRepository::new(state.pool())
        .list(&OrderFilter {
            status: params.status,
            cancellation_status: params.cancellation_status,
            search: params.q,
            limit: per_page,
            offset: (page - 1) * per_page,
        })
        .await?;

    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(order_id): Path<OrderId>,
) -> Result<Json<AdminOrderDetail>> {
    let order = OrderRepository::new(state.pool()).get(order_id).await?;
    Ok(Json(order))
}

/// Body for the status endpoint.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: OrderStatus,
}

/// POST /api/orders/{id}/status
///
/// Flat assignment, validated against the transition table. SHIPPED and
/// DELIVERED transitions notify the customer by email when SMTP is
/// configured; a send failure never fails the request.
#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(order_id): Path<OrderId>,
    Json(body): Json<StatusBody>,
) -> Result<Json<AdminOrder>> {
    let order = OrderRepository::new(state.pool())
        .update_status(order_id, body.status)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::Conflict(msg) => AppError::BadRequest(msg),
            other => other.into(),
        })?;

    tracing::info!(
        order_number = %order.order_number,
        status = %order.status,
        "order status updated"
    );

    if matches!(body.status, OrderStatus::Shipped | OrderStatus::Delivered) {
        notify_customer(&state, &order).await;
    }

    Ok(Json(order))
}

/// Body for the cancellation-decision endpoint.
#[derive(Debug, Deserialize)]
pub struct CancellationBody {
    pub approve: bool,
}

/// POST /api/orders/{id}/cancellation
#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn decide_cancellation(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(order_id): Path<OrderId>,
    Json(body): Json<CancellationBody>,
) -> Result<Json<AdminOrder>> {
    let order = OrderRepository::new(state.pool())
        .decide_cancellation(order_id, body.approve)
        .await?;

    tracing::info!(
        order_number = %order.order_number,
        approved = body.approve,
        "cancellation request decided"
    );

    if body.approve {
        notify_customer(&state, &order).await;
    }

    Ok(Json(order))
}

/// GET /api/orders/{id}/invoice
///
/// Assembles the invoice payload, sends it to the document renderer, and
/// streams the PDF back.
pub async fn invoice(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(order_id): Path<OrderId>,
) -> Result<impl IntoResponse> {
    let detail = OrderRepository::new(state.pool()).get(order_id).await?;

    let payload = invoice_payload(&detail);
    let pdf = state.documents().render_invoice(&payload).await?;

    let filename = format!("invoice-{}.pdf", detail.order.order_number);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        pdf,
    ))
}

fn invoice_payload(detail: &AdminOrderDetail) -> serde_json::Value {
    let order = &detail.order;
    json!({
        "order_number": order.order_number,
        "issued_at": order.created_at,
        "customer": {
            "name": order.customer_name,
            "email": order.customer_email,
        },
        "shipping_address": {
            "recipient": order.ship_recipient,
            "phone": order.ship_phone,
            "line1": order.ship_line1,
            "line2": order.ship_line2,
            "city": order.ship_city,
            "state": order.ship_state,
            "postal_code": order.ship_postal_code,
            "country": order.ship_country,
        },
        "lines": detail.items.iter().map(|item| json!({
            "title": item.title,
            "variant": item.variant_label,
            "unit_price": item.unit_price,
            "quantity": item.quantity,
        })).collect::<Vec<_>>(),
        "totals": {
            "subtotal": order.subtotal,
            "shipping": order.shipping,
            "tax": order.tax,
            "total": order.total,
        },
    })
}

// Best effort: a dead SMTP relay must not block order management.
async fn notify_customer(state: &AppState, order: &AdminOrder) {
    let Some(email) = state.email() else {
        return;
    };

    if let Err(e) = email
        .send_order_status(
            &order.customer_email,
            order.customer_name.as_deref(),
            &order.order_number,
            order.status,
        )
        .await
    {
        sentry::capture_error(&e);
        tracing::warn!(
            order_number = %order.order_number,
            error = %e,
            "order-status email failed"
        );
    }
}
