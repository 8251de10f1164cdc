//! Development seed data: a small catalog, two collections, and a homepage.
//!
//! Idempotent by slug: rerunning skips anything that already exists.

use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;

use super::{CommandError, connect};

struct SeedProduct {
    slug: &'static str,
    title: &'static str,
    description: &'static str,
    price: Decimal,
    compare_at_price: Option<Decimal>,
    collections: &'static [&'static str],
    variants: &'static [(&'static str, &'static str, i32)],
}

fn catalog() -> Vec<SeedProduct> {
    vec![
        SeedProduct {
            slug: "mulmul-wrap-dress",
            title: "Mulmul Wrap Dress",
            description: "Breathable cotton mulmul in a relaxed wrap silhouette.",
            price: Decimal::new(2_499, 0),
            compare_at_price: Some(Decimal::new(2_999, 0)),
            collections: &["new-season", "dresses"],
            variants: &[
                ("VL-MWD-S", "S", 12),
                ("VL-MWD-M", "M", 18),
                ("VL-MWD-L", "L", 9),
            ],
        },
        SeedProduct {
            slug: "kota-doria-kurta",
            title: "Kota Doria Kurta",
            description: "Lightweight checkered weave, straight cut, side slits.",
            price: Decimal::new(1_799, 0),
            compare_at_price: None,
            collections: &["new-season"],
            variants: &[
                ("VL-KDK-S", "S", 20),
                ("VL-KDK-M", "M", 25),
                ("VL-KDK-L", "L", 14),
            ],
        },
        SeedProduct {
            slug: "chanderi-silk-saree",
            title: "Chanderi Silk Saree",
            description: "Sheer texture with a fine zari border; blouse piece included.",
            price: Decimal::new(5_499, 0),
            compare_at_price: Some(Decimal::new(6_499, 0)),
            collections: &["dresses"],
            variants: &[("VL-CSS-OS", "Free Size", 7)],
        },
        SeedProduct {
            slug: "linen-palazzo-pants",
            title: "Linen Palazzo Pants",
            description: "High waist, wide leg, washed European flax.",
            price: Decimal::new(2_199, 0),
            compare_at_price: None,
            collections: &["new-season"],
            variants: &[
                ("VL-LPP-S", "S", 16),
                ("VL-LPP-M", "M", 22),
            ],
        },
    ]
}

/// Seed the catalog and homepage sections.
///
/// # Errors
///
/// Returns `CommandError` if connecting or any insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect("STOREFRONT_DATABASE_URL").await?;

    seed_collections(&pool).await?;
    seed_products(&pool).await?;
    seed_sections(&pool).await?;

    tracing::info!("Seed complete");
    Ok(())
}

async fn seed_collections(pool: &PgPool) -> Result<(), CommandError> {
    let collections = [
        ("new-season", "New Season", "Fresh drops for the new season."),
        ("dresses", "Dresses & Drapes", "Dresses, kurtas, and sarees."),
    ];

    for (slug, title, description) in collections {
        sqlx::query(
            r"
            INSERT INTO shop.collections (slug, title, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (slug) DO NOTHING
            ",
        )
        .bind(slug)
        .bind(title)
        .bind(description)
        .execute(pool)
        .await?;
    }

    tracing::info!("Seeded {} collections", collections.len());
    Ok(())
}

async fn seed_products(pool: &PgPool) -> Result<(), CommandError> {
    let products = catalog();

    for product in &products {
        let inserted: Option<(i32,)> = sqlx::query_as(
            r"
            INSERT INTO shop.products (slug, title, description, price, compare_at_price)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (slug) DO NOTHING
            RETURNING id
            ",
        )
        .bind(product.slug)
        .bind(product.title)
        .bind(product.description)
        .bind(product.price)
        .bind(product.compare_at_price)
        .fetch_optional(pool)
        .await?;

        // Already seeded on a previous run.
        let Some((product_id,)) = inserted else {
            continue;
        };

        for (sku, label, stock) in product.variants {
            sqlx::query(
                r"
                INSERT INTO shop.product_variants (product_id, sku, label, stock)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (sku) DO NOTHING
                ",
            )
            .bind(product_id)
            .bind(sku)
            .bind(label)
            .bind(stock)
            .execute(pool)
            .await?;
        }

        for (position, collection_slug) in product.collections.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO shop.product_collections (product_id, collection_id, position)
                SELECT $1, id, $3 FROM shop.collections WHERE slug = $2
                ON CONFLICT DO NOTHING
                ",
            )
            .bind(product_id)
            .bind(collection_slug)
            .bind(i32::try_from(position).unwrap_or(0))
            .execute(pool)
            .await?;
        }
    }

    tracing::info!("Seeded {} products", products.len());
    Ok(())
}

async fn seed_sections(pool: &PgPool) -> Result<(), CommandError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM shop.sections")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        tracing::info!("Sections already present, skipping");
        return Ok(());
    }

    let sections = [
        (
            "HERO",
            json!({
                "slides": [
                    {
                        "image_url": "https://cdn.velvetloom.in/sections/hero-monsoon.jpg",
                        "headline": "The Monsoon Edit",
                        "link_url": "/collections/new-season"
                    }
                ]
            }),
        ),
        (
            "NEW_ARRIVALS",
            json!({ "title": "Just In", "limit": 8 }),
        ),
        (
            "COLLECTION_STRIP",
            json!({ "collection_slug": "dresses", "title": "Dresses & Drapes" }),
        ),
        (
            "PROMO",
            json!({
                "image_url": "https://cdn.velvetloom.in/sections/promo-shipping.jpg",
                "link_url": "/collections/new-season",
                "headline": "Free shipping over ₹999"
            }),
        ),
    ];

    for (position, (section_type, payload)) in sections.iter().enumerate() {
        sqlx::query(
            r"
            INSERT INTO shop.sections (section_type, payload, position, published)
            VALUES ($1::shop.section_type, $2, $3, true)
            ",
        )
        .bind(section_type)
        .bind(payload)
        .bind(i32::try_from(position).unwrap_or(0) + 1)
        .execute(pool)
        .await?;
    }

    tracing::info!("Seeded {} homepage sections", sections.len());
    Ok(())
}
