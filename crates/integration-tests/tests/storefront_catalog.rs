//! Storefront catalog and content tests.
//!
//! Require a running storefront with seeded data; see the crate docs.

use reqwest::StatusCode;
use serde_json::Value;

use velvet_loom_integration_tests::TestContext;

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn health_endpoints_respond() {
    let ctx = TestContext::from_env();

    let resp = ctx
        .client
        .get(format!("{}/health", ctx.storefront_url))
        .send()
        .await
        .expect("health request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .get(format!("{}/health/ready", ctx.storefront_url))
        .send()
        .await
        .expect("readiness request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn home_returns_published_sections_in_order() {
    let ctx = TestContext::from_env();

    let body: Value = ctx
        .client
        .get(format!("{}/home", ctx.storefront_url))
        .send()
        .await
        .expect("home request failed")
        .json()
        .await
        .expect("home response was not JSON");

    let sections = body["sections"].as_array().expect("sections array");
    assert!(!sections.is_empty(), "seeded homepage should have sections");

    let positions: Vec<i64> = sections
        .iter()
        .map(|s| s["position"].as_i64().expect("position"))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "sections must come back in display order");
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn product_listing_filters_by_price() {
    let ctx = TestContext::from_env();

    let body: Value = ctx
        .client
        .get(format!(
            "{}/products?min_price=2000&max_price=3000&sort=price_asc",
            ctx.storefront_url
        ))
        .send()
        .await
        .expect("listing request failed")
        .json()
        .await
        .expect("listing response was not JSON");

    let products = body["products"].as_array().expect("product array");
    let mut last_price = 0.0;
    for product in products {
        let price: f64 = product["price"]
            .as_str()
            .expect("price string")
            .parse()
            .expect("numeric price");
        assert!((2000.0..=3000.0).contains(&price));
        assert!(price >= last_price, "price_asc ordering");
        last_price = price;
    }
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn inverted_price_range_is_rejected() {
    let ctx = TestContext::from_env();

    let resp = ctx
        .client
        .get(format!(
            "{}/products?min_price=3000&max_price=1000",
            ctx.storefront_url
        ))
        .send()
        .await
        .expect("listing request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn product_detail_includes_variants_and_review_summary() {
    let ctx = TestContext::from_env();

    let body: Value = ctx
        .client
        .get(format!(
            "{}/products/mulmul-wrap-dress",
            ctx.storefront_url
        ))
        .send()
        .await
        .expect("detail request failed")
        .json()
        .await
        .expect("detail response was not JSON");

    assert_eq!(body["slug"], "mulmul-wrap-dress");
    assert!(body["variants"].as_array().is_some_and(|v| !v.is_empty()));
    assert!(body["reviews"]["review_count"].is_i64());
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn unknown_product_is_404() {
    let ctx = TestContext::from_env();

    let resp = ctx
        .client
        .get(format!("{}/products/no-such-slug", ctx.storefront_url))
        .send()
        .await
        .expect("detail request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
