//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::services::{DocumentsClient, EmailService, IdentityClient, MediaService};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("identity client: {0}")]
    Identity(#[from] crate::services::identity::IdentityError),
    #[error("media service: {0}")]
    Media(#[from] crate::services::media::MediaError),
    #[error("documents client: {0}")]
    Documents(#[from] crate::services::documents::DocumentsError),
    #[error("email service: {0}")]
    Email(#[from] crate::services::email::EmailError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    identity: IdentityClient,
    media: MediaService,
    documents: DocumentsClient,
    /// `None` when SMTP is not configured; notifications are skipped.
    email: Option<EmailService>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if an external service client fails to build.
    pub fn new(config: AdminConfig, pool: PgPool) -> Result<Self, StateError> {
        let identity = IdentityClient::new(&config.identity)?;
        let media = MediaService::new(&config.media)?;
        let documents = DocumentsClient::new(&config.documents)?;
        let email = config.email.as_ref().map(EmailService::new).transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                identity,
                media,
                documents,
                email,
            }),
        })
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the identity provider client.
    #[must_use]
    pub fn identity(&self) -> &IdentityClient {
        &self.inner.identity
    }

    /// Get a reference to the media service.
    #[must_use]
    pub fn media(&self) -> &MediaService {
        &self.inner.media
    }

    /// Get a reference to the document renderer client.
    #[must_use]
    pub fn documents(&self) -> &DocumentsClient {
        &self.inner.documents
    }

    /// Email service, when SMTP is configured.
    #[must_use]
    pub fn email(&self) -> Option<&EmailService> {
        self.inner.email.as_ref()
    }
}
