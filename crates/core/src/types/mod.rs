//! Core types for Velvet Loom.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod content;
pub mod email;
pub mod id;
pub mod price;
pub mod status;
pub mod totals;

pub use content::{SectionPayloadError, SectionType};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use status::*;
pub use totals::OrderTotals;
