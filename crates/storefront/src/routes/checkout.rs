//! Checkout route handlers.
//!
//! Checkout runs in two steps:
//!
//! 1. `POST /checkout` snapshots the cart into a PENDING order and creates
//!    the paired gateway order. The response carries everything the payment
//!    widget needs.
//! 2. `POST /checkout/verify` checks the capture signature the gateway hands
//!    back to the client. A valid signature marks the order PAID/PROCESSING
//!    and clears the cart; an invalid one leaves the order PENDING.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use velvet_loom_core::{AddressId, CurrencyCode, OrderTotals, Price};

use crate::db::{AddressRepository, CartRepository, OrderRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{CurrentUser, Order, ShippingAddress};
use crate::state::AppState;

/// Body for starting a checkout.
#[derive(Debug, Deserialize)]
pub struct CheckoutBody {
    /// Which of the user's saved addresses to ship to.
    pub address_id: AddressId,
}

/// Response for a started checkout.
#[derive(Serialize)]
pub struct CheckoutResponse {
    pub order: Order,
    /// Gateway order id the payment widget opens with.
    pub gateway_order_id: String,
    /// Amount in minor units, as sent to the gateway.
    pub amount: i64,
    pub currency: &'static str,
    /// Public key id for the widget.
    pub key_id: String,
}

/// Body for verifying a capture.
#[derive(Debug, Deserialize)]
pub struct VerifyBody {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    /// Hex-encoded HMAC-SHA256 over `"{order_id}|{payment_id}"`.
    pub signature: String,
}

/// POST /checkout
#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn start(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<CheckoutBody>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let lines = CartRepository::new(state.pool()).lines(user.id).await?;
    if lines.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let address = AddressRepository::new(state.pool())
        .get(user.id, body.address_id)
        .await?
        .ok_or_else(|| AppError::NotFound("address".to_string()))?;

    let totals = OrderTotals::from_lines(lines.iter().map(|l| (l.unit_price, l.quantity)));
    let amount = Price::new(totals.total, CurrencyCode::INR)
        .minor_units()
        .ok_or_else(|| AppError::Internal("order total out of range".to_string()))?;

    let shipping_address = ShippingAddress {
        ship_recipient: address.recipient,
        ship_phone: address.phone,
        ship_line1: address.line1,
        ship_line2: address.line2,
        ship_city: address.city,
        ship_state: address.state,
        ship_postal_code: address.postal_code,
        ship_country: address.country,
    };

    // Gateway first: if it fails we have created nothing locally.
    let gateway_order = state
        .payments()
        .create_order(amount, CurrencyCode::INR.code(), &user.subject)
        .await?;

    let order = OrderRepository::new(state.pool())
        .create(user.id, &lines, &totals, &shipping_address, &gateway_order.id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            order,
            gateway_order_id: gateway_order.id,
            amount,
            currency: CurrencyCode::INR.code(),
            key_id: state.config().payment.key_id.clone(),
        }),
    ))
}

/// POST /checkout/verify
#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn verify(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(body): Json<VerifyBody>,
) -> Result<Json<Order>> {
    let repo = OrderRepository::new(state.pool());
    let order = repo
        .get_by_gateway_order_id(user.id, &body.gateway_order_id)
        .await?
        .ok_or_else(|| AppError::NotFound("order".to_string()))?;

    if !state.payments().verify_signature(
        &body.gateway_order_id,
        &body.gateway_payment_id,
        &body.signature,
    ) {
        record_failed_verification(&user, &body);
        return Err(AppError::BadRequest(
            "payment signature verification failed".to_string(),
        ));
    }

    let order = repo.mark_paid(order.id, &body.gateway_payment_id).await?;

    // The cart fulfilled its purpose; a failure here must not undo the paid
    // order, so log and move on.
    if let Err(e) = CartRepository::new(state.pool()).clear(user.id).await {
        tracing::warn!(error = %e, order_id = %order.id, "Failed to clear cart after payment");
    }

    Ok(Json(order))
}

/// Failed verifications are fraud signals; keep them visible.
fn record_failed_verification(user: &CurrentUser, body: &VerifyBody) {
    tracing::warn!(
        user_id = %user.id,
        gateway_order_id = %body.gateway_order_id,
        gateway_payment_id = %body.gateway_payment_id,
        "Payment signature verification failed"
    );
    sentry::capture_message(
        "Payment signature verification failed",
        sentry::Level::Warning,
    );
}
