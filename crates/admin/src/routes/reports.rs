//! Reporting endpoints.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::db::ReportRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::{MonthlyRevenue, TopProduct};
use crate::state::AppState;

const DEFAULT_MONTHS: u32 = 12;
const MAX_MONTHS: u32 = 36;

const DEFAULT_TOP_PRODUCTS: i64 = 10;
const MAX_TOP_PRODUCTS: i64 = 50;

/// Query parameters for the revenue report.
#[derive(Debug, Default, Deserialize)]
pub struct RevenueParams {
    pub months: Option<u32>,
}

/// GET /api/reports/revenue
pub async fn revenue(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<RevenueParams>,
) -> Result<Json<Vec<MonthlyRevenue>>> {
    let months = params.months.unwrap_or(DEFAULT_MONTHS).clamp(1, MAX_MONTHS);
    let buckets = ReportRepository::new(state.pool())
        .monthly_revenue(months)
        .await?;
    Ok(Json(buckets))
}

/// Query parameters for the top-products report.
#[derive(Debug, Default, Deserialize)]
pub struct TopProductsParams {
    pub limit: Option<i64>,
}

/// GET /api/reports/top-products
pub async fn top_products(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<TopProductsParams>,
) -> Result<Json<Vec<TopProduct>>> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_TOP_PRODUCTS)
        .clamp(1, MAX_TOP_PRODUCTS);
    let products = ReportRepository::new(state.pool())
        .top_products(limit)
        .await?;
    Ok(Json(products))
}
