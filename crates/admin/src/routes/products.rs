//! Catalog management: product CRUD, stock, and archiving.
//!
//! Image URLs arrive from the media service after a direct browser upload;
//! this API only stores them.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use velvet_loom_core::{ProductId, VariantId};

use crate::db::{
    ProductRepository,
    products::{ImageInput, ProductInput, VariantInput},
};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Product, ProductImage, ProductVariant};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 25;
const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Substring match on title or slug.
    pub q: Option<String>,
    /// Include archived products (default true; this is the back office).
    pub include_archived: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// GET /api/products
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Product>>> {
    let per_page = params
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let page = params.page.unwrap_or(1).max(1);

    let products = ProductRepository::new(state.pool())
        .list(
            params.q.as_deref(),
            params.include_archived.unwrap_or(true),
            per_page,
            (page - 1) * per_page,
        )
        .await?;

    Ok(Json(products))
}

/// Response for the product detail endpoint.
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    #[serde(flatten)]
    pub product: Product,
    pub variants: Vec<ProductVariant>,
    pub images: Vec<ProductImage>,
}

/// GET /api/products/{id}
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(product_id): Path<ProductId>,
) -> Result<Json<DetailResponse>> {
    let repo = ProductRepository::new(state.pool());
    let product = repo.get(product_id).await?;
    let variants = repo.variants(product_id).await?;
    let images = repo.images(product_id).await?;

    Ok(Json(DetailResponse {
        product,
        variants,
        images,
    }))
}

/// A variant in a create/update body.
#[derive(Debug, Deserialize)]
pub struct VariantBody {
    pub sku: String,
    pub label: String,
    #[serde(default)]
    pub stock: i32,
    pub price_override: Option<Decimal>,
}

/// An image in a create/update body.
#[derive(Debug, Deserialize)]
pub struct ImageBody {
    pub url: String,
    pub alt: Option<String>,
    #[serde(default)]
    pub position: i32,
}

/// Body for product creation.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub compare_at_price: Option<Decimal>,
    #[serde(default)]
    pub variants: Vec<VariantBody>,
    #[serde(default)]
    pub images: Vec<ImageBody>,
}

/// Body for product update. `variants`/`images` absent means "leave as is";
/// present means "replace with this set".
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub compare_at_price: Option<Decimal>,
    pub variants: Option<Vec<VariantBody>>,
    pub images: Option<Vec<ImageBody>>,
}

fn validate_product(slug: &str, title: &str, price: Decimal) -> Result<()> {
    if slug.trim().is_empty() || title.trim().is_empty() {
        return Err(AppError::BadRequest(
            "slug and title are required".to_string(),
        ));
    }
    if price < Decimal::ZERO {
        return Err(AppError::BadRequest("price must not be negative".to_string()));
    }
    Ok(())
}

fn to_variant_inputs(variants: &[VariantBody]) -> Result<Vec<VariantInput>> {
    variants
        .iter()
        .map(|v| {
            if v.sku.trim().is_empty() || v.label.trim().is_empty() {
                return Err(AppError::BadRequest(
                    "variant sku and label are required".to_string(),
                ));
            }
            if v.stock < 0 {
                return Err(AppError::BadRequest(
                    "variant stock must not be negative".to_string(),
                ));
            }
            Ok(VariantInput {
                sku: v.sku.clone(),
                label: v.label.clone(),
                stock: v.stock,
                price_override: v.price_override,
            })
        })
        .collect()
}

fn to_image_inputs(images: &[ImageBody]) -> Vec<ImageInput> {
    images
        .iter()
        .map(|i| ImageInput {
            url: i.url.clone(),
            alt: i.alt.clone(),
            position: i.position,
        })
        .collect()
}

/// POST /api/products
#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(body): Json<CreateBody>,
) -> Result<(StatusCode, Json<Product>)> {
    validate_product(&body.slug, &body.title, body.price)?;
    let variants = to_variant_inputs(&body.variants)?;
    let images = to_image_inputs(&body.images);

    let product = ProductRepository::new(state.pool())
        .create(
            &ProductInput {
                slug: body.slug,
                title: body.title,
                description: body.description,
                price: body.price,
                compare_at_price: body.compare_at_price,
            },
            &variants,
            &images,
        )
        .await?;

    tracing::info!(product_id = %product.id, slug = %product.slug, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PATCH /api/products/{id}
#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(product_id): Path<ProductId>,
    Json(body): Json<UpdateBody>,
) -> Result<Json<Product>> {
    validate_product(&body.slug, &body.title, body.price)?;
    let variants = body.variants.as_deref().map(to_variant_inputs).transpose()?;
    let images = body.images.as_deref().map(to_image_inputs);

    let product = ProductRepository::new(state.pool())
        .update(
            product_id,
            &ProductInput {
                slug: body.slug,
                title: body.title,
                description: body.description,
                price: body.price,
                compare_at_price: body.compare_at_price,
            },
            variants.as_deref(),
            images.as_deref(),
        )
        .await?;

    Ok(Json(product))
}

/// Body for the stock endpoint.
#[derive(Debug, Deserialize)]
pub struct StockBody {
    pub stock: i32,
}

/// PATCH /api/products/{id}/variants/{variant_id}/stock
pub async fn set_stock(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((_, variant_id)): Path<(ProductId, VariantId)>,
    Json(body): Json<StockBody>,
) -> Result<Json<ProductVariant>> {
    if body.stock < 0 {
        return Err(AppError::BadRequest(
            "stock must not be negative".to_string(),
        ));
    }

    let variant = ProductRepository::new(state.pool())
        .set_stock(variant_id, body.stock)
        .await?;
    Ok(Json(variant))
}

/// POST /api/products/{id}/archive
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn archive(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .archive(product_id)
        .await?;
    tracing::info!(product_id = %product.id, "product archived");
    Ok(Json(product))
}

/// POST /api/products/{id}/unarchive
pub async fn unarchive(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .unarchive(product_id)
        .await?;
    Ok(Json(product))
}
