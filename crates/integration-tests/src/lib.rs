//! Integration test harness for the Cevichería backend.
//!
//! Each test spawns the full application on an ephemeral local port and
//! talks to it over HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory tests
//! cargo test -p cevicheria-integration-tests
//!
//! # Including the PostgreSQL tests (needs a scratch database)
//! TEST_DATABASE_URL=postgres://localhost/cevicheria_test \
//!     cargo test -p cevicheria-integration-tests -- --include-ignored
//! ```

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use secrecy::SecretString;
use sqlx::PgPool;

use cevicheria_server::{AppState, ServerConfig, db, routes};

/// A running server and a client pointed at it.
pub struct TestServer {
    pub client: Client,
    base_url: String,
}

/// Configuration for test servers; serves the real static pages.
#[must_use]
pub fn test_config() -> ServerConfig {
    ServerConfig {
        static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../server/public")),
        ..ServerConfig::default()
    }
}

impl TestServer {
    /// Server with in-memory stores and the house menu.
    pub async fn in_memory() -> Self {
        Self::spawn(AppState::in_memory(test_config())).await
    }

    /// Server whose stores all live in `pool`.
    pub async fn postgres(pool: PgPool) -> Self {
        Self::spawn(AppState::postgres(test_config(), pool)).await
    }

    /// Serve `state` on 127.0.0.1 with an OS-assigned port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn(state: AppState) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let app = routes::app(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Connect to `TEST_DATABASE_URL`, migrate, and empty every table.
///
/// # Panics
///
/// Panics if the variable is unset or the database cannot be prepared.
pub async fn scratch_database() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL")
        .map(SecretString::from)
        .expect("TEST_DATABASE_URL must be set for PostgreSQL tests");

    let pool = db::create_pool(&url, Duration::from_secs(5))
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("../server/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    sqlx::query("TRUNCATE productos, usuarios, pedidos RESTART IDENTITY")
        .execute(&pool)
        .await
        .expect("Failed to reset tables");

    pool
}
