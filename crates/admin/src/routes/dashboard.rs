//! Dashboard: headline KPIs plus the most recent orders.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::db::{OrderRepository, ReportRepository, orders::OrderFilter};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::{AdminOrder, DashboardKpis};
use crate::state::AppState;

const RECENT_ORDER_COUNT: i64 = 10;

/// Response for the dashboard endpoint.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub kpis: DashboardKpis,
    pub recent_orders: Vec<AdminOrder>,
}

/// GET /api/dashboard
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<DashboardResponse>> {
    let kpis = ReportRepository::new(state.pool()).dashboard_kpis().await?;
    let recent_orders = OrderRepository::new(state.pool())
        .list(&OrderFilter {
            limit: RECENT_ORDER_COUNT,
            ..Default::default()
        })
        .await?;

    Ok(Json(DashboardResponse {
        kpis,
        recent_orders,
    }))
}
