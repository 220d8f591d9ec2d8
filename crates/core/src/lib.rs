//! Cevichería Core - Shared domain types.
//!
//! This crate provides the value types used across the Cevichería components:
//! - `server` - REST + GraphQL ordering backend
//! - `cli` - Migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP handling. Database encoding is available behind the `postgres`
//! feature so the server and CLI can bind these types directly in queries.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for identifiers, prices, emails, and order status

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
