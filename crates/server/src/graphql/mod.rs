//! GraphQL schema for the product board.
//!
//! ```graphql
//! type Query {
//!   obtenerProductos: [Producto!]!
//!   obtenerProducto(id: ID!): Producto
//! }
//!
//! type Mutation {
//!   crearProducto(nombre: String!, descripcion: String!, valor: Int!): Producto!
//!   actualizarProducto(id: ID!, nombre: String, descripcion: String, valor: Int): Producto
//!   eliminarProducto(id: ID!): Boolean!
//! }
//! ```

pub mod board;

use std::sync::Arc;

use async_graphql::{EmptySubscription, ID, Object, Schema};

pub use board::{BoardProduct, BoardUpdate, ProductBoard};

/// The executable board schema.
pub type BoardSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build a schema over a fresh, empty board.
#[must_use]
pub fn build_schema() -> BoardSchema {
    let board = Arc::new(ProductBoard::new());
    Schema::build(
        QueryRoot {
            board: Arc::clone(&board),
        },
        MutationRoot { board },
        EmptySubscription,
    )
    .finish()
}

pub struct QueryRoot {
    board: Arc<ProductBoard>,
}

#[Object]
impl QueryRoot {
    /// Every product on the board, in creation order.
    #[graphql(name = "obtenerProductos")]
    async fn products(&self) -> Vec<BoardProduct> {
        self.board.list().await
    }

    #[graphql(name = "obtenerProducto")]
    async fn product(&self, id: ID) -> Option<BoardProduct> {
        self.board.get(&id).await
    }
}

pub struct MutationRoot {
    board: Arc<ProductBoard>,
}

#[Object]
impl MutationRoot {
    #[graphql(name = "crearProducto")]
    async fn create_product(
        &self,
        #[graphql(name = "nombre")] name: String,
        #[graphql(name = "descripcion")] description: String,
        #[graphql(name = "valor")] value: i32,
    ) -> BoardProduct {
        self.board.create(name, description, value).await
    }

    /// Overwrite the supplied fields; null when the id is unknown.
    #[graphql(name = "actualizarProducto")]
    async fn update_product(
        &self,
        id: ID,
        #[graphql(name = "nombre")] name: Option<String>,
        #[graphql(name = "descripcion")] description: Option<String>,
        #[graphql(name = "valor")] value: Option<i32>,
    ) -> Option<BoardProduct> {
        let update = BoardUpdate {
            name,
            description,
            value,
        };
        self.board.update(&id, update).await
    }

    #[graphql(name = "eliminarProducto")]
    async fn delete_product(&self, id: ID) -> bool {
        self.board.remove(&id).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    async fn run(schema: &BoardSchema, query: &str) -> serde_json::Value {
        let response = schema.execute(query).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        response.data.into_json().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_crud_round() {
        let schema = build_schema();

        let created = run(
            &schema,
            r#"mutation { crearProducto(nombre: "Ceviche", descripcion: "Clásico", valor: 25) { id nombre valor } }"#,
        )
        .await;
        assert_eq!(
            created,
            json!({"crearProducto": {"id": "1", "nombre": "Ceviche", "valor": 25}})
        );

        let updated = run(
            &schema,
            r#"mutation { actualizarProducto(id: "1", valor: 28) { nombre descripcion valor } }"#,
        )
        .await;
        assert_eq!(
            updated,
            json!({"actualizarProducto": {"nombre": "Ceviche", "descripcion": "Clásico", "valor": 28}})
        );

        let listed = run(&schema, "{ obtenerProductos { id valor } }").await;
        assert_eq!(
            listed,
            json!({"obtenerProductos": [{"id": "1", "valor": 28}]})
        );

        let deleted = run(&schema, r#"mutation { eliminarProducto(id: "1") }"#).await;
        assert_eq!(deleted, json!({"eliminarProducto": true}));

        let missing = run(&schema, r#"{ obtenerProducto(id: "1") { id } }"#).await;
        assert_eq!(missing, json!({"obtenerProducto": null}));
    }

    #[tokio::test]
    async fn test_unknown_ids() {
        let schema = build_schema();

        let updated = run(
            &schema,
            r#"mutation { actualizarProducto(id: "42", nombre: "x") { id } }"#,
        )
        .await;
        assert_eq!(updated, json!({"actualizarProducto": null}));

        let deleted = run(&schema, r#"mutation { eliminarProducto(id: "42") }"#).await;
        assert_eq!(deleted, json!({"eliminarProducto": false}));
    }

    #[tokio::test]
    async fn test_create_requires_every_field() {
        let schema = build_schema();
        let response = schema
            .execute(r#"mutation { crearProducto(nombre: "Sin valor", descripcion: "") { id } }"#)
            .await;
        assert!(!response.errors.is_empty());
    }
}
