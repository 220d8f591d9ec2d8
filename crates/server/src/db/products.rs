//! Product repository for the `productos` table.

use rust_decimal::Decimal;
use sqlx::PgPool;

use cevicheria_core::{Price, ProductId};

use super::RepositoryError;
use crate::catalog::filter::{ProductFilter, SQL_PREDICATE, SearchColumns};
use crate::models::{Product, ProductDraft};

const PRODUCT_COLUMNS: &str =
    "id::text AS id, nombre, precio, categoria, stock, descripcion, ingredientes";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    nombre: String,
    precio: Decimal,
    categoria: String,
    stock: i64,
    descripcion: String,
    ingredientes: Vec<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::new(row.precio).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price for product {}: {e}", row.id))
        })?;
        let stock = u32::try_from(row.stock).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "stock out of range for product {}: {}",
                row.id, row.stock
            ))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.nombre,
            price,
            category: row.categoria,
            stock,
            description: row.descripcion,
            ingredients: row.ingredientes,
        })
    }
}

/// Numeric key behind a product id; `None` for ids the table cannot hold.
fn row_key(id: &ProductId) -> Option<i64> {
    id.as_str().parse().ok()
}

/// `stock` is `BIGINT`, so every `u32` is stored as given.
fn stock_column(stock: u32) -> i64 {
    i64::from(stock)
}

/// Repository for catalog database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a product and return it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let search = SearchColumns::new(&draft.name, &draft.ingredients);
        let sql = format!(
            "INSERT INTO productos \
                 (nombre, precio, categoria, stock, descripcion, ingredientes, \
                  nombre_busqueda, ingredientes_busqueda) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {PRODUCT_COLUMNS}"
        );

        let row: ProductRow = sqlx::query_as(&sql)
            .bind(&draft.name)
            .bind(draft.price.amount())
            .bind(&draft.category)
            .bind(stock_column(draft.stock))
            .bind(&draft.description)
            .bind(&draft.ingredients)
            .bind(&search.name)
            .bind(&search.ingredients)
            .fetch_one(self.pool)
            .await?;

        row.try_into()
    }

    /// List products matching `filter` in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM productos WHERE {SQL_PREDICATE} ORDER BY id");

        let rows: Vec<ProductRow> = sqlx::query_as(&sql)
            .bind(filter.category())
            .bind(filter.needle())
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let Some(key) = row_key(id) else {
            return Ok(None);
        };
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM productos WHERE id = $1");

        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(key)
            .fetch_optional(self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Overwrite every column of an existing product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn save(&self, product: &Product) -> Result<Option<Product>, RepositoryError> {
        let Some(key) = row_key(&product.id) else {
            return Ok(None);
        };
        let search = SearchColumns::new(&product.name, &product.ingredients);
        let sql = format!(
            "UPDATE productos SET \
                 nombre = $2, precio = $3, categoria = $4, stock = $5, descripcion = $6, \
                 ingredientes = $7, nombre_busqueda = $8, ingredientes_busqueda = $9 \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        );

        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(key)
            .bind(&product.name)
            .bind(product.price.amount())
            .bind(&product.category)
            .bind(stock_column(product.stock))
            .bind(&product.description)
            .bind(&product.ingredients)
            .bind(&search.name)
            .bind(&search.ingredients)
            .fetch_optional(self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Delete a product.
    ///
    /// Returns `true` if a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        let Some(key) = row_key(id) else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM productos WHERE id = $1")
            .bind(key)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Distinct categories in the order they first appeared.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let categories: Vec<String> = sqlx::query_scalar(
            "SELECT categoria FROM productos GROUP BY categoria ORDER BY MIN(id)",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Number of products in the table.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM productos")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
