//! User and address models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use velvet_loom_core::{AddressId, Email, UserId};

/// A storefront user.
///
/// Authentication lives with the identity provider; this row only keeps the
/// profile fields the shop needs locally, keyed by the provider's subject.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    /// Identity provider subject (stable external user id).
    #[serde(skip_serializing)]
    pub subject: String,
    pub email: Email,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The authenticated user attached to a request by the auth extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub subject: String,
    pub email: Email,
    pub name: Option<String>,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            subject: user.subject.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// A saved shipping/billing address.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Address {
    pub id: AddressId,
    #[serde(skip_serializing)]
    pub user_id: UserId,
    /// Display label, e.g. "Home" or "Office".
    pub label: Option<String>,
    pub recipient: String,
    pub phone: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
