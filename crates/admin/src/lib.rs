//! Velvet Loom Admin - back-office API library.
//!
//! See `main.rs` for the binary entry point.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
