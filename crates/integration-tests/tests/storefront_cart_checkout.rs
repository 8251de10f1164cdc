//! Storefront cart and checkout tests.
//!
//! Require a running storefront, seeded data, and `TEST_USER_TOKEN`.

use reqwest::StatusCode;
use serde_json::{Value, json};

use velvet_loom_integration_tests::TestContext;

async fn clear_cart(ctx: &TestContext, token: &str) {
    let resp = ctx
        .client
        .delete(format!("{}/cart", ctx.storefront_url))
        .bearer_auth(token)
        .send()
        .await
        .expect("clear cart failed");
    assert!(resp.status().is_success());
}

async fn first_product_id(ctx: &TestContext) -> i64 {
    let body: Value = ctx
        .client
        .get(format!("{}/products", ctx.storefront_url))
        .send()
        .await
        .expect("listing request failed")
        .json()
        .await
        .expect("listing response was not JSON");

    body["products"]
        .as_array()
        .and_then(|products| products.first())
        .and_then(|p| p["id"].as_i64())
        .expect("seeded catalog should have products")
}

#[tokio::test]
#[ignore = "Requires running storefront server and TEST_USER_TOKEN"]
async fn cart_requires_authentication() {
    let ctx = TestContext::from_env();

    let resp = ctx
        .client
        .get(format!("{}/cart", ctx.storefront_url))
        .send()
        .await
        .expect("cart request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront server and TEST_USER_TOKEN"]
async fn duplicate_cart_add_folds_quantity() {
    let ctx = TestContext::from_env();
    let token = TestContext::user_token();
    clear_cart(&ctx, &token).await;

    let product_id = first_product_id(&ctx).await;

    for _ in 0..2 {
        let resp = ctx
            .client
            .post(format!("{}/cart/items", ctx.storefront_url))
            .bearer_auth(&token)
            .json(&json!({ "product_id": product_id, "quantity": 2 }))
            .send()
            .await
            .expect("add to cart failed");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let cart: Value = ctx
        .client
        .get(format!("{}/cart", ctx.storefront_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("cart request failed")
        .json()
        .await
        .expect("cart response was not JSON");

    let items = cart["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1, "duplicate add must fold into one line");
    assert_eq!(items[0]["quantity"], 4);

    clear_cart(&ctx, &token).await;
}

#[tokio::test]
#[ignore = "Requires running storefront server and TEST_USER_TOKEN"]
async fn removing_last_item_leaves_empty_cart_with_zero_totals() {
    let ctx = TestContext::from_env();
    let token = TestContext::user_token();
    clear_cart(&ctx, &token).await;

    let product_id = first_product_id(&ctx).await;

    let cart: Value = ctx
        .client
        .post(format!("{}/cart/items", ctx.storefront_url))
        .bearer_auth(&token)
        .json(&json!({ "product_id": product_id }))
        .send()
        .await
        .expect("add to cart failed")
        .json()
        .await
        .expect("cart response was not JSON");
    let item_id = cart["items"][0]["id"].as_i64().expect("item id");

    let cart: Value = ctx
        .client
        .delete(format!("{}/cart/items/{item_id}", ctx.storefront_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("remove failed")
        .json()
        .await
        .expect("cart response was not JSON");

    assert_eq!(cart["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(cart["totals"]["total"].as_str(), Some("0"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and TEST_USER_TOKEN"]
async fn checkout_with_empty_cart_is_rejected() {
    let ctx = TestContext::from_env();
    let token = TestContext::user_token();
    clear_cart(&ctx, &token).await;

    let resp = ctx
        .client
        .post(format!("{}/checkout", ctx.storefront_url))
        .bearer_auth(&token)
        .json(&json!({ "address_id": 1 }))
        .send()
        .await
        .expect("checkout request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront server and TEST_USER_TOKEN"]
async fn verify_with_forged_signature_is_rejected() {
    let ctx = TestContext::from_env();
    let token = TestContext::user_token();

    let resp = ctx
        .client
        .post(format!("{}/checkout/verify", ctx.storefront_url))
        .bearer_auth(&token)
        .json(&json!({
            "gateway_order_id": "order_missing",
            "gateway_payment_id": "pay_forged",
            "signature": "deadbeef",
        }))
        .send()
        .await
        .expect("verify request failed");
    assert!(
        resp.status() == StatusCode::BAD_REQUEST || resp.status() == StatusCode::NOT_FOUND,
        "forged verification must not succeed: {}",
        resp.status()
    );
}
