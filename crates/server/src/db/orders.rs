//! Order repository for the `pedidos` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;

use cevicheria_core::{Email, OrderId, OrderStatus, Price};

use super::RepositoryError;
use crate::models::Order;

const ORDER_COLUMNS: &str = "id, usuario_email, productos, total, fecha, estado";

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    usuario_email: String,
    productos: Json<Value>,
    total: Decimal,
    fecha: DateTime<Utc>,
    estado: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let corrupt = |what: &str, e: &dyn std::fmt::Display| {
            RepositoryError::DataCorruption(format!("invalid {what} in order {}: {e}", row.id))
        };

        let user_email = Email::parse(&row.usuario_email).map_err(|e| corrupt("email", &e))?;
        let total = Price::new(row.total).map_err(|e| corrupt("total", &e))?;
        let status = row
            .estado
            .parse::<OrderStatus>()
            .map_err(|e| corrupt("status", &e))?;

        Ok(Self {
            id: OrderId::new(row.id),
            user_email,
            items: row.productos.0,
            total,
            created_at: row.fecha,
            status,
        })
    }
}

/// Repository for order log database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append an already stamped order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, order: &Order) -> Result<Order, RepositoryError> {
        let sql = format!(
            "INSERT INTO pedidos ({ORDER_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {ORDER_COLUMNS}"
        );

        let row: OrderRow = sqlx::query_as(&sql)
            .bind(&order.id)
            .bind(&order.user_email)
            .bind(Json(&order.items))
            .bind(order.total.amount())
            .bind(order.created_at)
            .bind(order.status.as_str())
            .fetch_one(self.pool)
            .await?;

        row.try_into()
    }

    /// Orders placed by `email`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, email: &Email) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM pedidos \
             WHERE usuario_email = $1 \
             ORDER BY fecha DESC, seq DESC"
        );

        let rows: Vec<OrderRow> = sqlx::query_as(&sql)
            .bind(email)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(Order::try_from).collect()
    }
}
