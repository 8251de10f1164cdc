//! HTTP route handlers for the admin back office.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Health check
//!
//! # Auth (session)
//! POST /auth/login                          - Exchange identity token for a session
//! POST /auth/logout                         - Clear the session
//! GET  /auth/me                             - Current admin
//!
//! # Dashboard
//! GET  /api/dashboard                       - KPIs + recent orders
//!
//! # Orders
//! GET  /api/orders                          - Listing (status/cancellation/search)
//! GET  /api/orders/{id}                     - Detail with items
//! POST /api/orders/{id}/status              - Guarded status transition
//! POST /api/orders/{id}/cancellation        - Approve/reject a cancellation request
//! GET  /api/orders/{id}/invoice             - Rendered PDF invoice
//!
//! # Customers
//! GET  /api/customers                       - Listing with order aggregates
//! GET  /api/customers/{id}                  - Profile + order history
//!
//! # Catalog
//! GET    /api/products                      - Listing (archived included)
//! POST   /api/products                      - Create with variants/images
//! GET    /api/products/{id}                 - Detail
//! PATCH  /api/products/{id}                 - Update (optionally replace variants/images)
//! PATCH  /api/products/{id}/variants/{vid}/stock - Adjust stock
//! POST   /api/products/{id}/archive         - Soft delete
//! POST   /api/products/{id}/unarchive       - Restore
//! GET/POST /api/collections                 - Collections
//! GET/PATCH/DELETE /api/collections/{id}    - One collection
//! PUT  /api/collections/{id}/products       - Replace ordered membership
//!
//! # Content
//! GET/POST /api/content/sections            - Sections (drafts included)
//! PATCH/DELETE /api/content/sections/{id}   - One section
//! POST /api/content/sections/reorder        - Reassign positions
//!
//! # Media
//! POST   /api/media/signature               - Signed direct-upload params
//! DELETE /api/media                         - Delete an asset by public id
//!
//! # Reports
//! GET /api/reports/revenue?months=N         - Month-bucketed PAID revenue
//! GET /api/reports/top-products?limit=N     - Best sellers by units
//!
//! # Admin users (super_admin)
//! GET/POST /api/admin-users                 - List/create
//! PATCH    /api/admin-users/{id}/role       - Change role
//! DELETE   /api/admin-users/{id}            - Remove
//! ```

pub mod admin_users;
pub mod auth;
pub mod collections;
pub mod content;
pub mod customers;
pub mod dashboard;
pub mod media;
pub mod orders;
pub mod products;
pub mod reports;

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/status", post(orders::update_status))
        .route("/{id}/cancellation", post(orders::decide_cancellation))
        .route("/{id}/invoice", get(orders::invoice))
}

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::index))
        .route("/{id}", get(customers::show))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/{id}", get(products::show).patch(products::update))
        .route(
            "/{id}/variants/{variant_id}/stock",
            patch(products::set_stock),
        )
        .route("/{id}/archive", post(products::archive))
        .route("/{id}/unarchive", post(products::unarchive))
}

/// Create the collection routes router.
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(collections::index).post(collections::create))
        .route(
            "/{id}",
            get(collections::show)
                .patch(collections::update)
                .delete(collections::destroy),
        )
        .route("/{id}/products", put(collections::set_products))
}

/// Create the content routes router.
pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/sections", get(content::index).post(content::create))
        .route(
            "/sections/{id}",
            patch(content::update).delete(content::destroy),
        )
        .route("/sections/reorder", post(content::reorder))
}

/// Create the media routes router.
pub fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/signature", post(media::signature))
        .route("/", delete(media::destroy))
}

/// Create the report routes router.
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/revenue", get(reports::revenue))
        .route("/top-products", get(reports::top_products))
}

/// Create the admin-user routes router (super_admin only, enforced per
/// handler by `RequireSuperAdmin`).
pub fn admin_user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin_users::index).post(admin_users::create))
        .route("/{id}", delete(admin_users::destroy))
        .route("/{id}/role", patch(admin_users::set_role))
}

/// Create all routes for the admin API.
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .route("/dashboard", get(dashboard::show))
        .nest("/orders", order_routes())
        .nest("/customers", customer_routes())
        .nest("/products", product_routes())
        .nest("/collections", collection_routes())
        .nest("/content", content_routes())
        .nest("/media", media_routes())
        .nest("/reports", report_routes())
        .nest("/admin-users", admin_user_routes());

    Router::new()
        .nest("/auth", auth_routes())
        .nest("/api", api)
}
