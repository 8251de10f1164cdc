//! Integration test harness for Velvet Loom.
//!
//! These tests exercise the running services over HTTP and are ignored by
//! default; they require:
//!
//! - A migrated `PostgreSQL` database (`vl-cli migrate all && vl-cli seed`)
//! - The storefront server (`cargo run -p velvet-loom-storefront`)
//! - The admin server (`cargo run -p velvet-loom-admin`)
//! - Test credentials in the environment (see below)
//!
//! Run with: `cargo test -p velvet-loom-integration-tests -- --ignored`
//!
//! # Environment Variables
//!
//! - `STOREFRONT_URL` - storefront base URL (default `http://localhost:3000`)
//! - `ADMIN_URL` - admin base URL (default `http://localhost:3001`)
//! - `TEST_USER_TOKEN` - identity-provider token for a test shopper
//! - `TEST_ADMIN_TOKEN` - identity-provider token for a seeded admin user

use reqwest::Client;

/// Shared context for integration tests.
pub struct TestContext {
    pub client: Client,
    pub storefront_url: String,
    pub admin_url: String,
}

impl TestContext {
    /// Build a context from the environment.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn from_env() -> Self {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            storefront_url: std::env::var("STOREFRONT_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            admin_url: std::env::var("ADMIN_URL")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),
        }
    }

    /// Shopper bearer token from the environment.
    ///
    /// # Panics
    ///
    /// Panics with a pointer to the required env var when it is missing.
    #[must_use]
    pub fn user_token() -> String {
        std::env::var("TEST_USER_TOKEN").expect("TEST_USER_TOKEN is required for this test")
    }

    /// Admin login token from the environment.
    ///
    /// # Panics
    ///
    /// Panics with a pointer to the required env var when it is missing.
    #[must_use]
    pub fn admin_token() -> String {
        std::env::var("TEST_ADMIN_TOKEN").expect("TEST_ADMIN_TOKEN is required for this test")
    }

    /// Sign the cookie-store client in to the admin API.
    ///
    /// # Panics
    ///
    /// Panics if the login call fails.
    pub async fn admin_login(&self) {
        let resp = self
            .client
            .post(format!("{}/auth/login", self.admin_url))
            .json(&serde_json::json!({ "token": Self::admin_token() }))
            .send()
            .await
            .expect("admin login request failed");
        assert!(
            resp.status().is_success(),
            "admin login rejected: {}",
            resp.status()
        );
    }
}
