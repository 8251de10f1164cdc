//! Customer views: profiles with order aggregates and history.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use velvet_loom_core::UserId;

use crate::db::{CustomerRepository, OrderRepository};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::{AdminOrder, Customer, CustomerAddress};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 25;
const MAX_PAGE_SIZE: i64 = 100;
const HISTORY_LIMIT: i64 = 50;

/// Query parameters for the customer listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Substring match on email or name.
    pub q: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// GET /api/customers
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Customer>>> {
    let per_page = params
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let page = params.page.unwrap_or(1).max(1);

    let customers = CustomerRepository::new(state.pool())
        .list(params.q.as_deref(), per_page, (page - 1) * per_page)
        .await?;

    Ok(Json(customers))
}

/// Response for the customer detail endpoint.
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    #[serde(flatten)]
    pub customer: Customer,
    pub addresses: Vec<CustomerAddress>,
    pub orders: Vec<AdminOrder>,
}

/// GET /api/customers/{id}
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(user_id): Path<UserId>,
) -> Result<Json<DetailResponse>> {
    let repo = CustomerRepository::new(state.pool());
    let customer = repo.get(user_id).await?;
    let addresses = repo.addresses(user_id).await?;
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user_id, HISTORY_LIMIT)
        .await?;

    Ok(Json(DetailResponse {
        customer,
        addresses,
        orders,
    }))
}
