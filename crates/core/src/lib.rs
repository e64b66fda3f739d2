//! Bazaar Core - Shared types library.
//!
//! This crate provides common types used across all Bazaar components:
//! - `storefront` - Server-rendered shop front and order API client
//! - `api` - Reference catalog/order REST API
//! - `cli` - Command-line shopping client
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, order statuses, the cart and the
//!   JSON shapes exchanged with the order API

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
