//! Velvet Loom Core - Shared types library.
//!
//! This crate provides common types used across all Velvet Loom components:
//! - `storefront` - Public-facing e-commerce JSON API
//! - `admin` - Internal back-office JSON API
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, statuses,
//!   checkout totals arithmetic, and the homepage section content model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
