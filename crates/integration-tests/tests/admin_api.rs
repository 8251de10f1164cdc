//! Back-office API tests.
//!
//! Require a running admin server, a seeded database, and
//! `TEST_ADMIN_TOKEN` for an account present in `admin.admin_users`.
//! The shared client carries the session cookie between requests.

use reqwest::StatusCode;
use serde_json::{Value, json};

use velvet_loom_integration_tests::TestContext;

#[tokio::test]
#[ignore = "Requires running admin server and TEST_ADMIN_TOKEN"]
async fn api_rejects_requests_without_a_session() {
    let ctx = TestContext::from_env();

    let resp = ctx
        .client
        .get(format!("{}/api/dashboard", ctx.admin_url))
        .send()
        .await
        .expect("dashboard request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running admin server and TEST_ADMIN_TOKEN"]
async fn login_establishes_a_session() {
    let ctx = TestContext::from_env();
    ctx.admin_login().await;

    let me: Value = ctx
        .client
        .get(format!("{}/auth/me", ctx.admin_url))
        .send()
        .await
        .expect("me request failed")
        .json()
        .await
        .expect("me response was not JSON");
    assert!(me["email"].as_str().is_some());
    assert!(me["role"].as_str().is_some());
}

#[tokio::test]
#[ignore = "Requires running admin server and TEST_ADMIN_TOKEN"]
async fn dashboard_returns_kpis_and_recent_orders() {
    let ctx = TestContext::from_env();
    ctx.admin_login().await;

    let body: Value = ctx
        .client
        .get(format!("{}/api/dashboard", ctx.admin_url))
        .send()
        .await
        .expect("dashboard request failed")
        .json()
        .await
        .expect("dashboard response was not JSON");

    for key in [
        "total_revenue",
        "order_count",
        "customer_count",
        "product_count",
        "pending_cancellations",
    ] {
        assert!(!body[key].is_null(), "missing KPI {key}");
    }
    let recent = body["recent_orders"].as_array().expect("recent_orders");
    assert!(recent.len() <= 10);
}

#[tokio::test]
#[ignore = "Requires running admin server and TEST_ADMIN_TOKEN"]
async fn order_status_filter_only_returns_matching_orders() {
    let ctx = TestContext::from_env();
    ctx.admin_login().await;

    let body: Value = ctx
        .client
        .get(format!("{}/api/orders?status=PENDING", ctx.admin_url))
        .send()
        .await
        .expect("orders request failed")
        .json()
        .await
        .expect("orders response was not JSON");

    for order in body.as_array().expect("orders array") {
        assert_eq!(order["status"].as_str(), Some("PENDING"));
    }
}

#[tokio::test]
#[ignore = "Requires running admin server and seeded orders"]
async fn invalid_status_transition_is_rejected_without_a_write() {
    let ctx = TestContext::from_env();
    ctx.admin_login().await;

    let orders: Value = ctx
        .client
        .get(format!("{}/api/orders?status=PENDING", ctx.admin_url))
        .send()
        .await
        .expect("orders request failed")
        .json()
        .await
        .expect("orders response was not JSON");
    let Some(order) = orders.as_array().and_then(|o| o.first()) else {
        return; // nothing pending to exercise
    };
    let id = order["id"].as_i64().expect("order id");

    // PENDING -> DELIVERED skips the whole chain.
    let resp = ctx
        .client
        .post(format!("{}/api/orders/{id}/status", ctx.admin_url))
        .json(&json!({ "status": "DELIVERED" }))
        .send()
        .await
        .expect("status request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let after: Value = ctx
        .client
        .get(format!("{}/api/orders/{id}", ctx.admin_url))
        .send()
        .await
        .expect("order request failed")
        .json()
        .await
        .expect("order response was not JSON");
    assert_eq!(after["status"].as_str(), Some("PENDING"));
}

#[tokio::test]
#[ignore = "Requires running admin server and TEST_ADMIN_TOKEN"]
async fn section_payload_is_validated_on_create() {
    let ctx = TestContext::from_env();
    ctx.admin_login().await;

    // A hero without slides must not be accepted.
    let resp = ctx
        .client
        .post(format!("{}/api/content/sections", ctx.admin_url))
        .json(&json!({
            "section_type": "HERO",
            "payload": { "autoplay": true },
        }))
        .send()
        .await
        .expect("section request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.expect("error body was not JSON");
    assert!(
        body["error"].as_str().unwrap_or_default().contains("slides"),
        "error should name the missing field: {body}"
    );
}

#[tokio::test]
#[ignore = "Requires running admin server and TEST_ADMIN_TOKEN"]
async fn section_lifecycle_create_publish_reorder_delete() {
    let ctx = TestContext::from_env();
    ctx.admin_login().await;

    let created: Value = ctx
        .client
        .post(format!("{}/api/content/sections", ctx.admin_url))
        .json(&json!({
            "section_type": "PROMO",
            "payload": {
                "image_url": "https://cdn.example.com/promo/eos.jpg",
                "link_url": "/collections/sale",
                "heading": "End of season",
            },
        }))
        .send()
        .await
        .expect("create failed")
        .json()
        .await
        .expect("create response was not JSON");
    let id = created["id"].as_i64().expect("section id");
    assert_eq!(created["published"], false);

    let updated: Value = ctx
        .client
        .patch(format!("{}/api/content/sections/{id}", ctx.admin_url))
        .json(&json!({ "published": true }))
        .send()
        .await
        .expect("publish failed")
        .json()
        .await
        .expect("publish response was not JSON");
    assert_eq!(updated["published"], true);

    // Move the new section to the front and confirm the order round-trips.
    let sections: Value = ctx
        .client
        .get(format!("{}/api/content/sections", ctx.admin_url))
        .send()
        .await
        .expect("list failed")
        .json()
        .await
        .expect("list response was not JSON");
    let mut ids: Vec<i64> = sections
        .as_array()
        .expect("sections array")
        .iter()
        .map(|s| s["id"].as_i64().expect("section id"))
        .collect();
    ids.retain(|&existing| existing != id);
    ids.insert(0, id);

    let reordered: Value = ctx
        .client
        .post(format!("{}/api/content/sections/reorder", ctx.admin_url))
        .json(&json!({ "section_ids": ids }))
        .send()
        .await
        .expect("reorder failed")
        .json()
        .await
        .expect("reorder response was not JSON");
    assert_eq!(reordered[0]["id"].as_i64(), Some(id));

    let resp = ctx
        .client
        .delete(format!("{}/api/content/sections/{id}", ctx.admin_url))
        .send()
        .await
        .expect("delete failed");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "Requires running admin server and a non-super-admin TEST_ADMIN_TOKEN"]
async fn admin_user_management_requires_super_admin() {
    let ctx = TestContext::from_env();
    ctx.admin_login().await;

    let me: Value = ctx
        .client
        .get(format!("{}/auth/me", ctx.admin_url))
        .send()
        .await
        .expect("me request failed")
        .json()
        .await
        .expect("me response was not JSON");
    if me["role"].as_str() == Some("super_admin") {
        return; // token outranks the check this test exists for
    }

    let resp = ctx
        .client
        .get(format!("{}/api/admin-users", ctx.admin_url))
        .send()
        .await
        .expect("admin-users request failed");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running admin server and TEST_ADMIN_TOKEN"]
async fn media_signature_rejects_unknown_folder() {
    let ctx = TestContext::from_env();
    ctx.admin_login().await;

    let resp = ctx
        .client
        .post(format!("{}/api/media/signature", ctx.admin_url))
        .json(&json!({ "folder": "../etc" }))
        .send()
        .await
        .expect("signature request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let ok: Value = ctx
        .client
        .post(format!("{}/api/media/signature", ctx.admin_url))
        .json(&json!({ "folder": "products" }))
        .send()
        .await
        .expect("signature request failed")
        .json()
        .await
        .expect("signature response was not JSON");
    assert!(ok["signature"].as_str().is_some());
    assert!(ok["timestamp"].as_i64().is_some());
}
