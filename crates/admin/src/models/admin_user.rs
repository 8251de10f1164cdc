//! Admin user domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use velvet_loom_core::{AdminUserId, Email};

// Re-export AdminRole from core for convenience
pub use velvet_loom_core::AdminRole;

/// Session storage keys.
pub mod session_keys {
    /// The logged-in admin, set after a successful token exchange.
    pub const CURRENT_ADMIN: &str = "current_admin";
}

/// An admin user row.
///
/// Admins authenticate at the identity provider; `subject` is the join key.
/// An identity without a matching row here gets no access regardless of its
/// token.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdminUser {
    pub id: AdminUserId,
    #[serde(skip_serializing)]
    pub subject: String,
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The session-resident view of a logged-in admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
}

impl From<&AdminUser> for CurrentAdmin {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}
