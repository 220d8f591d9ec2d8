//! Database access for the remote stores.
//!
//! # Tables
//!
//! - `productos` - Catalog, with case-folded search shadow columns
//! - `usuarios` - Profiles keyed by email
//! - `pedidos` - Append-only order log
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p cevicheria-cli -- migrate
//! ```
//!
//! Queries are checked at runtime (`sqlx::query_as` + `FromRow`) so the
//! workspace builds without a live database.

pub mod orders;
pub mod products;
pub mod users;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool.
///
/// The first connection is opened eagerly and bounded by `connect_timeout`,
/// so an unreachable database is detected at startup.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established in time.
pub async fn create_pool(
    database_url: &SecretString,
    connect_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(connect_timeout)
        .connect(database_url.expose_secret())
        .await
}

/// Check that the database answers a trivial query.
pub async fn ping(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}
