//! Payment gateway client.
//!
//! Payment capture happens on the gateway's hosted checkout. The storefront
//! only creates a gateway order (amount in minor units) and later verifies
//! the signature the gateway hands back to the client after capture:
//!
//! ```text
//! expected = HMAC-SHA256(key_secret, "{gateway_order_id}|{gateway_payment_id}")
//! ```
//!
//! Orders whose signatures fail verification stay PENDING.

use std::time::Duration;

use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use sha2::Sha256;
use thiserror::Error;

use crate::config::PaymentConfig;

type HmacSha256 = Hmac<Sha256>;

/// Errors that can occur when interacting with the payment gateway.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Gateway order created for a checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    /// Gateway-side order identifier, stored on the local order row.
    pub id: String,
    /// Amount in minor units (paise).
    pub amount: i64,
    pub currency: String,
}

/// Client for the hosted payment gateway.
#[derive(Clone)]
pub struct PaymentClient {
    client: reqwest::Client,
    base_url: String,
    key_secret: secrecy::SecretString,
}

impl PaymentClient {
    /// Create a new payment gateway client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &PaymentConfig) -> Result<Self, PaymentError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.key_id);
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| PaymentError::Parse(format!("Invalid key id format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            key_secret: config.key_secret.clone(),
        })
    }

    /// Create a gateway order for the given amount in minor units.
    ///
    /// The local order number is passed as a receipt so gateway dashboards
    /// can be cross-referenced with local orders.
    ///
    /// # Errors
    ///
    /// Returns error if the gateway rejects the request or the response
    /// cannot be parsed.
    pub async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, PaymentError> {
        let url = format!("{}/v1/orders", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "amount": amount_minor,
                "currency": currency,
                "receipt": receipt,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))
    }

    /// Verify a capture signature returned by the gateway.
    ///
    /// Constant-time comparison via the `hmac` crate's `verify_slice`.
    #[must_use]
    pub fn verify_signature(
        &self,
        gateway_order_id: &str,
        gateway_payment_id: &str,
        signature_hex: &str,
    ) -> bool {
        let Ok(signature) = hex::decode(signature_hex) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(self.key_secret.expose_secret().as_bytes())
        else {
            return false;
        };
        mac.update(format!("{gateway_order_id}|{gateway_payment_id}").as_bytes());
        mac.verify_slice(&signature).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(secret: &str) -> PaymentClient {
        PaymentClient::new(&PaymentConfig {
            base_url: "http://localhost:9000".to_string(),
            key_id: "key_test".to_string(),
            key_secret: secrecy::SecretString::from(secret),
        })
        .unwrap()
    }

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{order_id}|{payment_id}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_verify_signature_accepts_valid() {
        let client = test_client("super-secret");
        let sig = sign("super-secret", "gw_order_1", "gw_pay_1");
        assert!(client.verify_signature("gw_order_1", "gw_pay_1", &sig));
    }

    #[test]
    fn test_verify_signature_rejects_wrong_payment_id() {
        let client = test_client("super-secret");
        let sig = sign("super-secret", "gw_order_1", "gw_pay_1");
        assert!(!client.verify_signature("gw_order_1", "gw_pay_2", &sig));
    }

    #[test]
    fn test_verify_signature_rejects_wrong_secret() {
        let client = test_client("super-secret");
        let sig = sign("other-secret", "gw_order_1", "gw_pay_1");
        assert!(!client.verify_signature("gw_order_1", "gw_pay_1", &sig));
    }

    #[test]
    fn test_verify_signature_rejects_garbage_hex() {
        let client = test_client("super-secret");
        assert!(!client.verify_signature("gw_order_1", "gw_pay_1", "not-hex"));
    }
}
