//! External service adapters.
//!
//! Authentication and payment capture are handled by external providers;
//! these modules wrap their HTTP APIs behind small typed clients.

pub mod identity;
pub mod payments;

pub use identity::IdentityClient;
pub use payments::PaymentClient;
