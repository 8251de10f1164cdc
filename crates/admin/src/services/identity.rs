//! Identity provider client for back-office sign-in.
//!
//! The admin API never stores credentials. At login the browser obtains a
//! token from the hosted identity provider and posts it here; this client
//! exchanges the token for a profile once, and the session cookie carries
//! the authenticated admin from then on. No verification cache is needed.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use crate::config::IdentityConfig;

/// Errors that can occur when interacting with the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Token was rejected by the provider.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Profile returned by the identity provider for a verified token.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityProfile {
    /// Stable subject identifier, the join key for `admin.admin_users`.
    pub subject: String,
    pub email: String,
    pub name: Option<String>,
}

/// Client for the hosted identity provider.
#[derive(Clone)]
pub struct IdentityClient {
    client: reqwest::Client,
    base_url: String,
}

impl IdentityClient {
    /// Create a new identity client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| IdentityError::Parse(format!("Invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Exchange a login token for the associated profile.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::InvalidToken` when the provider rejects the
    /// token, or a transport/parse error otherwise.
    pub async fn verify_token(&self, token: &str) -> Result<IdentityProfile, IdentityError> {
        let url = format!("{}/v1/tokens/verify", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(IdentityError::InvalidToken);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IdentityError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| IdentityError::Parse(e.to_string()))
    }
}
