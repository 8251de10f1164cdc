//! Product review route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::{ProductRepository, ReviewRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{Review, ReviewSummary};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 50;
const MAX_COMMENT_LENGTH: usize = 2_000;

/// Query parameters for the review listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Review listing response.
#[derive(Serialize)]
pub struct ListResponse {
    pub reviews: Vec<Review>,
    pub summary: ReviewSummary,
    pub page: i64,
    pub per_page: i64,
}

/// Body for posting a review.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
    /// 1..=5 stars.
    pub rating: i32,
    pub comment: Option<String>,
}

/// GET /products/{slug}/reviews
pub async fn index(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>> {
    let product = ProductRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product '{slug}'")))?;

    let page = params.page.unwrap_or(1).max(1);
    let per_page = params
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let repo = ReviewRepository::new(state.pool());
    let reviews = repo
        .for_product(product.id, per_page, (page - 1) * per_page)
        .await?;
    let summary = repo.summary(product.id).await?;

    Ok(Json(ListResponse {
        reviews,
        summary,
        page,
        per_page,
    }))
}

/// POST /products/{slug}/reviews
#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(slug): Path<String>,
    Json(body): Json<CreateBody>,
) -> Result<(StatusCode, Json<Review>)> {
    if !(1..=5).contains(&body.rating) {
        return Err(AppError::BadRequest(
            "rating must be between 1 and 5".to_string(),
        ));
    }
    if let Some(comment) = &body.comment
        && comment.len() > MAX_COMMENT_LENGTH
    {
        return Err(AppError::BadRequest(format!(
            "comment must be at most {MAX_COMMENT_LENGTH} characters"
        )));
    }

    let product = ProductRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product '{slug}'")))?;

    let author_name = user.name.as_deref().unwrap_or("Anonymous");
    let review = ReviewRepository::new(state.pool())
        .create(
            product.id,
            user.id,
            author_name,
            body.rating,
            body.comment.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}
