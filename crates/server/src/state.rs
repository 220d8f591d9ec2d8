//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{info, warn};

use crate::catalog::{Catalog, InMemoryCatalog, fixtures};
use crate::config::ServerConfig;
use crate::db;
use crate::directory::{Directory, InMemoryDirectory};
use crate::graphql::{BoardSchema, build_schema};
use crate::order_log::{InMemoryOrderLog, OrderLog};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the stores, the GraphQL schema and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: Option<PgPool>,
    catalog: Catalog,
    directory: Directory,
    orders: OrderLog,
    schema: BoardSchema,
}

impl AppState {
    /// Build the state, choosing the storage backend once.
    ///
    /// With a reachable `DATABASE_URL` every store uses `PostgreSQL`.
    /// Otherwise the server runs in memory with the house menu seeded
    /// into the catalog.
    pub async fn connect(config: ServerConfig) -> Self {
        let pool = match &config.database_url {
            Some(url) => match db::create_pool(url, config.connect_timeout).await {
                Ok(pool) => Some(pool),
                Err(e) => {
                    warn!(error = %e, "database unreachable, running in memory");
                    None
                }
            },
            None => {
                info!("DATABASE_URL not set, running in memory");
                None
            }
        };

        match pool {
            Some(pool) => Self::postgres(config, pool),
            None => Self::in_memory(config),
        }
    }

    /// State with every store in process memory and the menu seeded.
    #[must_use]
    pub fn in_memory(config: ServerConfig) -> Self {
        Self::from_parts(
            config,
            None,
            Catalog::in_memory(InMemoryCatalog::seeded(fixtures::menu())),
            Directory::in_memory(InMemoryDirectory::new()),
            OrderLog::in_memory(InMemoryOrderLog::new()),
        )
    }

    /// State with every store backed by `pool`.
    #[must_use]
    pub fn postgres(config: ServerConfig, pool: PgPool) -> Self {
        let catalog = Catalog::postgres(pool.clone(), config.snapshot_ttl);
        let directory = Directory::postgres(pool.clone());
        let orders = OrderLog::postgres(pool.clone());
        Self::from_parts(config, Some(pool), catalog, directory, orders)
    }

    /// Assemble state from explicit stores.
    #[must_use]
    pub fn from_parts(
        config: ServerConfig,
        pool: Option<PgPool>,
        catalog: Catalog,
        directory: Directory,
        orders: OrderLog,
    ) -> Self {
        info!(backend = catalog.backend_name(), "stores ready");

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                catalog,
                directory,
                orders,
                schema: build_schema(),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// The database pool, when running against `PostgreSQL`.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn directory(&self) -> &Directory {
        &self.inner.directory
    }

    #[must_use]
    pub fn orders(&self) -> &OrderLog {
        &self.inner.orders
    }

    /// Get a reference to the product board schema.
    #[must_use]
    pub fn schema(&self) -> &BoardSchema {
        &self.inner.schema
    }
}
