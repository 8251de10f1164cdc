//! HTTP middleware stack for the storefront API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Rate limiting (governor)
//!
//! Authentication is extractor-based: handlers take [`RequireUser`] or
//! [`OptionalUser`] rather than sitting behind an auth layer.

pub mod auth;
pub mod rate_limit;
pub mod request_id;

pub use auth::{OptionalUser, RequireUser};
pub use rate_limit::{api_rate_limiter, checkout_rate_limiter};
pub use request_id::request_id_middleware;
