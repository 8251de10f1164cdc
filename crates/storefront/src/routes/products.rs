//! Product catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::products::{ProductFilter, ProductSort};
use crate::db::{ProductRepository, ReviewRepository, WishlistRepository};
use crate::error::{AppError, Result};
use crate::middleware::OptionalUser;
use crate::models::{Product, ProductImage, ProductVariant, ReviewSummary};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 24;
const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Case-insensitive title search.
    pub q: Option<String>,
    /// Restrict to a collection by slug.
    pub collection: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// One of: newest, price_asc, price_desc, title.
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Product listing response.
#[derive(Serialize)]
pub struct ListResponse {
    pub products: Vec<Product>,
    pub page: i64,
    pub per_page: i64,
}

/// Product detail response: product plus variants, images, and the review
/// aggregate.
#[derive(Serialize)]
pub struct DetailResponse {
    #[serde(flatten)]
    pub product: Product,
    pub variants: Vec<ProductVariant>,
    pub images: Vec<ProductImage>,
    pub reviews: ReviewSummary,
    /// Present only when the request carried a valid bearer token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_wishlist: Option<bool>,
}

fn parse_sort(sort: Option<&str>) -> Result<ProductSort> {
    match sort {
        None | Some("newest") => Ok(ProductSort::Newest),
        Some("price_asc") => Ok(ProductSort::PriceAsc),
        Some("price_desc") => Ok(ProductSort::PriceDesc),
        Some("title") => Ok(ProductSort::TitleAsc),
        Some(other) => Err(AppError::BadRequest(format!("unknown sort '{other}'"))),
    }
}

/// GET /products
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>> {
    let page = params.page.unwrap_or(1).max(1);
    let per_page = params
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    if let (Some(min), Some(max)) = (params.min_price, params.max_price)
        && min > max
    {
        return Err(AppError::BadRequest(
            "min_price cannot exceed max_price".to_string(),
        ));
    }

    let filter = ProductFilter {
        query: params.q,
        collection_slug: params.collection,
        min_price: params.min_price,
        max_price: params.max_price,
        sort: parse_sort(params.sort.as_deref())?,
        limit: per_page,
        offset: (page - 1) * per_page,
    };

    let products = ProductRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(ListResponse {
        products,
        page,
        per_page,
    }))
}

/// GET /products/{slug}
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Path(slug): Path<String>,
) -> Result<Json<DetailResponse>> {
    let repo = ProductRepository::new(state.pool());
    let product = repo
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product '{slug}'")))?;

    let variants = repo.variants(product.id).await?;
    let images = repo.images(product.id).await?;
    let reviews = ReviewRepository::new(state.pool())
        .summary(product.id)
        .await?;

    let in_wishlist = match user {
        Some(user) => Some(
            WishlistRepository::new(state.pool())
                .contains(user.id, product.id)
                .await?,
        ),
        None => None,
    };

    Ok(Json(DetailResponse {
        product,
        variants,
        images,
        reviews,
        in_wishlist,
    }))
}
