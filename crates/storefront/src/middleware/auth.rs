//! Authentication extractors.
//!
//! The storefront is stateless: every authenticated request carries a bearer
//! token issued by the identity provider. The extractors verify the token
//! (cached in [`crate::services::IdentityClient`]) and upsert the local user
//! row keyed by the provider subject, so a first request from a new identity
//! creates the profile on the fly.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use velvet_loom_core::Email;

use crate::db::UserRepository;
use crate::error::set_sentry_user;
use crate::models::CurrentUser;
use crate::services::identity::IdentityError;
use crate::state::AppState;

/// Extractor that requires a verified bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireUser(user): RequireUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireUser(pub CurrentUser);

/// Error returned when authentication fails.
pub enum AuthRejection {
    /// Missing or malformed Authorization header, or rejected token.
    Unauthorized,
    /// Identity provider profile carried an invalid email.
    BadProfile,
    /// Provider or database failure while resolving the user.
    Internal,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid or missing bearer token"),
            Self::BadProfile => (StatusCode::UNAUTHORIZED, "Identity profile rejected"),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Pull the bearer token out of the Authorization header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Verify the token and resolve (upserting if needed) the local user.
async fn resolve_user(parts: &Parts, state: &AppState) -> Result<CurrentUser, AuthRejection> {
    let token = bearer_token(parts).ok_or(AuthRejection::Unauthorized)?;

    let profile = state.identity().verify_token(token).await.map_err(|e| {
        if matches!(e, IdentityError::InvalidToken) {
            AuthRejection::Unauthorized
        } else {
            sentry::capture_error(&e);
            tracing::error!(error = %e, "Identity verification failed");
            AuthRejection::Internal
        }
    })?;

    let email = Email::parse(&profile.email).map_err(|_| AuthRejection::BadProfile)?;

    let user = UserRepository::new(state.pool())
        .upsert_by_subject(&profile.subject, &email, profile.name.as_deref())
        .await
        .map_err(|e| {
            sentry::capture_error(&e);
            tracing::error!(error = %e, "User upsert failed");
            AuthRejection::Internal
        })?;

    set_sentry_user(&user.id, Some(user.email.as_ref()));

    Ok(CurrentUser::from(&user))
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_user(parts, state).await.map(Self)
    }
}

/// Extractor that optionally resolves the current user.
///
/// Unlike `RequireUser`, requests without an Authorization header pass
/// through with `None`. A header that is present but invalid still rejects.
pub struct OptionalUser(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if bearer_token(parts).is_none() {
            return Ok(Self(None));
        }
        resolve_user(parts, state).await.map(|u| Self(Some(u)))
    }
}
