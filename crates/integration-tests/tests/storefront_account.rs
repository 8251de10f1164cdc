//! Profile, address book, wishlist, and review tests.
//!
//! Require a running storefront, seeded data, and `TEST_USER_TOKEN`.

use reqwest::StatusCode;
use serde_json::{Value, json};

use velvet_loom_integration_tests::TestContext;

fn address_body(recipient: &str) -> Value {
    json!({
        "label": "Home",
        "recipient": recipient,
        "phone": "+91 98765 43210",
        "line1": "14 Lavelle Road",
        "city": "Bengaluru",
        "state": "Karnataka",
        "postal_code": "560001",
        "country": "IN",
    })
}

#[tokio::test]
#[ignore = "Requires running storefront server and TEST_USER_TOKEN"]
async fn profile_update_persists() {
    let ctx = TestContext::from_env();
    let token = TestContext::user_token();

    let updated: Value = ctx
        .client
        .patch(format!("{}/me", ctx.storefront_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Asha Verma" }))
        .send()
        .await
        .expect("update failed")
        .json()
        .await
        .expect("update response was not JSON");
    assert_eq!(updated["name"].as_str(), Some("Asha Verma"));

    let fetched: Value = ctx
        .client
        .get(format!("{}/me", ctx.storefront_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("profile request failed")
        .json()
        .await
        .expect("profile response was not JSON");
    assert_eq!(fetched["name"].as_str(), Some("Asha Verma"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and TEST_USER_TOKEN"]
async fn address_crud_and_default_selection() {
    let ctx = TestContext::from_env();
    let token = TestContext::user_token();

    let created: Value = ctx
        .client
        .post(format!("{}/me/addresses", ctx.storefront_url))
        .bearer_auth(&token)
        .json(&address_body("Asha Verma"))
        .send()
        .await
        .expect("create failed")
        .json()
        .await
        .expect("create response was not JSON");
    let id = created["id"].as_i64().expect("address id");

    let resp = ctx
        .client
        .post(format!("{}/me/addresses/{id}/default", ctx.storefront_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("set default failed");
    assert!(resp.status().is_success());

    let addresses: Value = ctx
        .client
        .get(format!("{}/me/addresses", ctx.storefront_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("list failed")
        .json()
        .await
        .expect("list response was not JSON");
    let defaults: Vec<&Value> = addresses
        .as_array()
        .expect("addresses array")
        .iter()
        .filter(|a| a["is_default"] == true)
        .collect();
    assert_eq!(defaults.len(), 1, "exactly one default address");
    assert_eq!(defaults[0]["id"].as_i64(), Some(id));

    let resp = ctx
        .client
        .delete(format!("{}/me/addresses/{id}", ctx.storefront_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("delete failed");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "Requires running storefront server and TEST_USER_TOKEN"]
async fn blank_address_fields_are_rejected() {
    let ctx = TestContext::from_env();
    let token = TestContext::user_token();

    let mut body = address_body("Asha Verma");
    body["city"] = json!("   ");

    let resp = ctx
        .client
        .post(format!("{}/me/addresses", ctx.storefront_url))
        .bearer_auth(&token)
        .json(&body)
        .send()
        .await
        .expect("create failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront server and TEST_USER_TOKEN"]
async fn duplicate_wishlist_add_conflicts() {
    let ctx = TestContext::from_env();
    let token = TestContext::user_token();

    let listing: Value = ctx
        .client
        .get(format!("{}/products", ctx.storefront_url))
        .send()
        .await
        .expect("listing failed")
        .json()
        .await
        .expect("listing response was not JSON");
    let product_id = listing["products"][0]["id"].as_i64().expect("product id");

    let first: Value = ctx
        .client
        .post(format!("{}/wishlist", ctx.storefront_url))
        .bearer_auth(&token)
        .json(&json!({ "product_id": product_id }))
        .send()
        .await
        .expect("add failed")
        .json()
        .await
        .expect("add response was not JSON");
    let item = first
        .as_array()
        .expect("wishlist array")
        .iter()
        .find(|i| i["product_id"].as_i64() == Some(product_id))
        .expect("added item present");
    let item_id = item["id"].as_i64().expect("item id");

    let resp = ctx
        .client
        .post(format!("{}/wishlist", ctx.storefront_url))
        .bearer_auth(&token)
        .json(&json!({ "product_id": product_id }))
        .send()
        .await
        .expect("second add failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = ctx
        .client
        .delete(format!("{}/wishlist/{item_id}", ctx.storefront_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("remove failed");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded products"]
async fn out_of_range_rating_is_rejected() {
    let ctx = TestContext::from_env();
    let token = TestContext::user_token();

    let resp = ctx
        .client
        .post(format!(
            "{}/products/mulmul-wrap-dress/reviews",
            ctx.storefront_url
        ))
        .bearer_auth(&token)
        .json(&json!({ "rating": 6, "comment": "Too good to rate" }))
        .send()
        .await
        .expect("review request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded products"]
async fn review_listing_paginates_and_summarizes() {
    let ctx = TestContext::from_env();

    let body: Value = ctx
        .client
        .get(format!(
            "{}/products/mulmul-wrap-dress/reviews?per_page=2",
            ctx.storefront_url
        ))
        .send()
        .await
        .expect("reviews request failed")
        .json()
        .await
        .expect("reviews response was not JSON");

    assert!(body["reviews"].as_array().expect("reviews array").len() <= 2);
    assert_eq!(body["per_page"].as_i64(), Some(2));
    assert!(!body["summary"]["review_count"].is_null());
}
