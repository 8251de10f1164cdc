//! Middleware and request extractors.

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{RequireAdmin, RequireSuperAdmin, clear_current_admin, set_current_admin};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
