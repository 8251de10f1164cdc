//! Document renderer adapter.
//!
//! Invoice PDFs are rendered by a hosted service: we POST the invoice
//! payload as JSON and get `application/pdf` bytes back. Nothing is stored
//! locally; the admin API streams the bytes through to the browser.

use std::time::Duration;

use axum::body::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use thiserror::Error;

use crate::config::DocumentsConfig;

/// Errors from the document renderer.
#[derive(Debug, Error)]
pub enum DocumentsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to build the client.
    #[error("Client error: {0}")]
    Client(String),
}

/// Client for the hosted document renderer.
#[derive(Clone)]
pub struct DocumentsClient {
    client: reqwest::Client,
    base_url: String,
}

impl DocumentsClient {
    /// Create a new documents client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &DocumentsConfig) -> Result<Self, DocumentsError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| DocumentsError::Client(format!("Invalid API key format: {e}")))?,
        );

        // PDF rendering is slow; allow more than the usual API timeout.
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Render an invoice payload to PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns `DocumentsError::Api` when the renderer rejects the payload.
    pub async fn render_invoice<T: Serialize + Sync>(
        &self,
        invoice: &T,
    ) -> Result<Bytes, DocumentsError> {
        let url = format!("{}/v1/render/invoice", self.base_url);
        let response = self.client.post(&url).json(invoice).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DocumentsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.bytes().await?)
    }
}
