//! Media CDN adapter.
//!
//! Browsers upload images directly to the CDN; the server only hands out
//! signed parameters so uploads cannot be forged. The signature is
//! HMAC-SHA256 over the parameters sorted by name and joined with `&`,
//! hex-encoded, which is what the CDN's management API verifies.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use sha2::Sha256;
use thiserror::Error;

use crate::config::MediaConfig;

type HmacSha256 = Hmac<Sha256>;

/// Errors from the media adapter.
#[derive(Debug, Error)]
pub enum MediaError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Parameters the browser attaches to its direct upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadSignature {
    pub timestamp: u64,
    pub folder: String,
    pub signature: String,
}

/// Client for the media CDN management API.
#[derive(Clone)]
pub struct MediaService {
    client: reqwest::Client,
    base_url: String,
    signing_secret: SecretString,
}

impl MediaService {
    /// Create a new media service.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &MediaConfig) -> Result<Self, MediaError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            signing_secret: config.signing_secret.clone(),
        })
    }

    /// Signed parameters for a direct browser upload into `folder`.
    #[must_use]
    pub fn upload_signature(&self, folder: &str) -> UploadSignature {
        let timestamp = unix_now();
        let signature = self.sign(&[("folder", folder), ("timestamp", &timestamp.to_string())]);

        UploadSignature {
            timestamp,
            folder: folder.to_owned(),
            signature,
        }
    }

    /// Delete an asset by its public id.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Api` when the CDN rejects the request.
    pub async fn delete_asset(&self, public_id: &str) -> Result<(), MediaError> {
        let timestamp = unix_now();
        let signature =
            self.sign(&[("public_id", public_id), ("timestamp", &timestamp.to_string())]);

        let url = format!("{}/assets/destroy", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "public_id": public_id,
                "timestamp": timestamp,
                "signature": signature,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MediaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    // Params must already be sorted by name; the CDN signs them the same way.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let to_sign = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let Ok(mut mac) =
            HmacSha256::new_from_slice(self.signing_secret.expose_secret().as_bytes())
        else {
            return String::new();
        };
        mac.update(to_sign.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> MediaService {
        MediaService::new(&MediaConfig {
            base_url: "https://media.test".to_string(),
            signing_secret: SecretString::from("k9x2mQ7vR4wP8sT1"),
        })
        .unwrap()
    }

    #[test]
    fn signature_is_deterministic_for_same_params() {
        let service = test_service();
        let a = service.sign(&[("folder", "products"), ("timestamp", "1700000000")]);
        let b = service.sign(&[("folder", "products"), ("timestamp", "1700000000")]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64); // hex sha256
    }

    #[test]
    fn signature_changes_with_params() {
        let service = test_service();
        let a = service.sign(&[("folder", "products"), ("timestamp", "1700000000")]);
        let b = service.sign(&[("folder", "banners"), ("timestamp", "1700000000")]);
        assert_ne!(a, b);
    }

    #[test]
    fn upload_signature_includes_folder() {
        let service = test_service();
        let params = service.upload_signature("products");
        assert_eq!(params.folder, "products");
        assert!(!params.signature.is_empty());
    }
}
