//! Clients for external collaborators: identity provider, media CDN
//! signing, document renderer, and transactional email.

pub mod documents;
pub mod email;
pub mod identity;
pub mod media;

pub use documents::DocumentsClient;
pub use email::EmailService;
pub use identity::IdentityClient;
pub use media::MediaService;
