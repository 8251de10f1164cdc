//! Transactional email over SMTP.
//!
//! Order-status notifications are best-effort: failures are logged and
//! reported to Sentry but never fail the request that triggered them.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use thiserror::Error;

use velvet_loom_core::OrderStatus;

use crate::config::EmailConfig;

/// Errors from the email service.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport failure.
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Message construction failure.
    #[error("Message error: {0}")]
    Message(#[from] lettre::error::Error),

    /// Recipient address could not be parsed.
    #[error("Address error: {0}")]
    Address(#[from] lettre::address::AddressError),
}

/// SMTP-backed sender for order-status notifications.
#[derive(Clone)]
pub struct EmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl EmailService {
    /// Create a new email service from SMTP configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP host is invalid.
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.expose_secret().to_owned(),
            ))
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }

    /// Send a plain-text order-status update to the customer.
    ///
    /// # Errors
    ///
    /// Returns error if the message cannot be built or sent.
    pub async fn send_order_status(
        &self,
        to: &str,
        customer_name: Option<&str>,
        order_number: &str,
        status: OrderStatus,
    ) -> Result<(), EmailError> {
        let greeting = customer_name.map_or_else(|| "Hi,".to_owned(), |n| format!("Hi {n},"));
        let status_line = match status {
            OrderStatus::Processing => "is being prepared for dispatch".to_owned(),
            OrderStatus::Shipped => "has shipped and is on its way".to_owned(),
            OrderStatus::Delivered => "has been delivered".to_owned(),
            OrderStatus::Cancelled => "has been cancelled".to_owned(),
            other => format!("is now {other}"),
        };

        let body = format!(
            "{greeting}\n\n\
             Your order {order_number} {status_line}.\n\n\
             You can view the order any time from your account.\n\n\
             Velvet Loom"
        );

        let message = Message::builder()
            .from(self.from_address.parse()?)
            .to(to.parse()?)
            .subject(format!("Your order {order_number}"))
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        self.transport.send(message).await?;
        Ok(())
    }
}
