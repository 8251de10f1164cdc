//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Health check
//! GET  /home                        - Homepage sections
//!
//! # Catalog (public)
//! GET  /products                    - Product listing (search/filter/sort)
//! GET  /products/{slug}             - Product detail
//! GET  /products/{slug}/reviews     - Review listing
//! POST /products/{slug}/reviews     - Post a review (auth)
//! GET  /collections                 - Collection listing
//! GET  /collections/{slug}          - Collection detail with products
//!
//! # Cart (auth)
//! GET    /cart                      - Current cart with totals preview
//! POST   /cart/items                - Add a line (folds duplicates)
//! PATCH  /cart/items/{id}           - Change a line's quantity
//! DELETE /cart/items/{id}           - Remove a line
//! DELETE /cart                      - Clear the cart
//!
//! # Wishlist (auth)
//! GET    /wishlist                  - Wishlist entries
//! POST   /wishlist                  - Add an entry (409 on duplicate)
//! DELETE /wishlist/{id}             - Remove an entry
//!
//! # Checkout (auth, strict rate limit)
//! POST /checkout                    - Snapshot cart into a PENDING order
//! POST /checkout/verify             - Verify capture signature
//!
//! # Orders (auth)
//! GET  /orders                      - Order history
//! GET  /orders/{id}                 - Order detail with items
//! POST /orders/{id}/cancel          - Request cancellation
//!
//! # Profile (auth)
//! GET   /me                         - Profile
//! PATCH /me                         - Update name/phone
//! GET   /me/addresses               - Address book
//! POST  /me/addresses               - Create address
//! PUT   /me/addresses/{id}          - Replace address
//! DELETE /me/addresses/{id}         - Delete address
//! POST  /me/addresses/{id}/default  - Make address the default
//! ```

pub mod cart;
pub mod checkout;
pub mod collections;
pub mod home;
pub mod orders;
pub mod products;
pub mod profile;
pub mod reviews;
pub mod wishlist;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::middleware::checkout_rate_limiter;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
        .route(
            "/{slug}/reviews",
            get(reviews::index).post(reviews::create),
        )
}

/// Create the collection routes router.
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(collections::index))
        .route("/{slug}", get(collections::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart::add_item))
        .route(
            "/items/{id}",
            patch(cart::update_item).delete(cart::remove_item),
        )
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::index).post(wishlist::add))
        .route("/{id}", delete(wishlist::remove))
}

/// Create the checkout routes router, behind the strict limiter.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::start))
        .route("/verify", post(checkout::verify))
        .layer(checkout_rate_limiter())
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/cancel", post(orders::request_cancellation))
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show).patch(profile::update))
        .route(
            "/addresses",
            get(profile::addresses).post(profile::create_address),
        )
        .route(
            "/addresses/{id}",
            axum::routing::put(profile::update_address).delete(profile::delete_address),
        )
        .route(
            "/addresses/{id}/default",
            post(profile::set_default_address),
        )
}

/// Create all routes for the storefront API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(home::home))
        .nest("/products", product_routes())
        .nest("/collections", collection_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/checkout", checkout_routes())
        .nest("/orders", order_routes())
        .nest("/me", profile_routes())
}
