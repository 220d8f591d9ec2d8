//! Append-only order log.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use cevicheria_core::Email;

use crate::db::OrderRepository;
use crate::error::StoreError;
use crate::models::{NewOrder, Order};

/// Orders held in process memory, in append order.
#[derive(Debug, Default)]
pub struct InMemoryOrderLog {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Handle to the order log. Cheap to clone.
#[derive(Clone)]
pub struct OrderLog {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    InMemory(Arc<InMemoryOrderLog>),
    Postgres(PgPool),
}

impl OrderLog {
    #[must_use]
    pub fn in_memory(log: InMemoryOrderLog) -> Self {
        Self {
            backend: Backend::InMemory(Arc::new(log)),
        }
    }

    #[must_use]
    pub const fn postgres(pool: PgPool) -> Self {
        Self {
            backend: Backend::Postgres(pool),
        }
    }

    /// Stamp and append an order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` when `usuarioEmail` is missing or
    /// blank, and `StoreError::Repository` if the database fails.
    #[instrument(skip(self, input))]
    pub async fn append(&self, input: NewOrder) -> Result<Order, StoreError> {
        let order = Order::stamp(input.validate()?, Utc::now());

        let order = match &self.backend {
            Backend::InMemory(log) => {
                log.orders.write().await.push(order.clone());
                order
            }
            Backend::Postgres(pool) => OrderRepository::new(pool).insert(&order).await?,
        };

        info!(id = %order.id, user = %order.user_email, total = %order.total, "order logged");
        Ok(order)
    }

    /// Orders placed by `email`.
    ///
    /// The in-memory log answers in append order; the database answers
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Repository` if the database fails.
    pub async fn list_for_user(&self, email: &Email) -> Result<Vec<Order>, StoreError> {
        match &self.backend {
            Backend::InMemory(log) => Ok(log
                .orders
                .read()
                .await
                .iter()
                .filter(|o| o.user_email == *email)
                .cloned()
                .collect()),
            Backend::Postgres(pool) => Ok(OrderRepository::new(pool).list_for_user(email).await?),
        }
    }
}
