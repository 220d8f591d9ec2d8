//! Cevichería ordering backend.
//!
//! # Architecture
//!
//! - Axum JSON API for the catalog, user profiles and orders
//! - `async-graphql` product board at `/graphql`
//! - `PostgreSQL` stores when `DATABASE_URL` is reachable at startup,
//!   in-memory stores otherwise
//! - Static HTML pages served from `STATIC_DIR`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod directory;
pub mod error;
pub mod graphql;
pub mod middleware;
pub mod models;
pub mod order_log;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use state::AppState;
