//! In-memory product board behind the GraphQL API.
//!
//! The board is a separate collection from the REST catalog: its products
//! carry only a name, a description and an integer value.

use std::sync::atomic::{AtomicU64, Ordering};

use async_graphql::{ID, SimpleObject};
use tokio::sync::RwLock;

/// A product on the board.
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "Producto")]
pub struct BoardProduct {
    pub id: ID,
    #[graphql(name = "nombre")]
    pub name: String,
    #[graphql(name = "descripcion")]
    pub description: String,
    #[graphql(name = "valor")]
    pub value: i32,
}

/// Fields of a partial board update. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct BoardUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub value: Option<i32>,
}

/// Board products in creation order, numbered from 1.
#[derive(Debug)]
pub struct ProductBoard {
    products: RwLock<Vec<BoardProduct>>,
    next_id: AtomicU64,
}

impl Default for ProductBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductBoard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub async fn list(&self) -> Vec<BoardProduct> {
        self.products.read().await.clone()
    }

    pub async fn get(&self, id: &ID) -> Option<BoardProduct> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == *id)
            .cloned()
    }

    pub async fn create(&self, name: String, description: String, value: i32) -> BoardProduct {
        let mut products = self.products.write().await;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let product = BoardProduct {
            id: ID(id.to_string()),
            name,
            description,
            value,
        };
        products.push(product.clone());
        product
    }

    /// Overwrite the supplied fields. `None` when `id` is unknown.
    pub async fn update(&self, id: &ID, update: BoardUpdate) -> Option<BoardProduct> {
        let mut products = self.products.write().await;
        let product = products.iter_mut().find(|p| p.id == *id)?;

        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        if let Some(value) = update.value {
            product.value = value;
        }
        Some(product.clone())
    }

    /// Remove a product. `false` when `id` is unknown.
    pub async fn remove(&self, id: &ID) -> bool {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != *id);
        products.len() != before
    }
}
