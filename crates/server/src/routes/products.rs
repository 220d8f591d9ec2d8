//! Product route handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};

use cevicheria_core::ProductId;

use crate::catalog::{ProductFilter, ProductQuery};
use crate::error::{AppError, Result};
use crate::models::{NewProduct, Product, ProductUpdate};
use crate::state::AppState;

/// List products, optionally filtered by category and search text.
///
/// GET /api/productos?categoria=&busqueda=
pub async fn index(
    State(state): State<AppState>,
    query: std::result::Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>> {
    let Query(query) = query?;
    let filter = ProductFilter::from(query);
    Ok(Json(state.catalog().list(&filter).await))
}

/// Get one product; `null` when it does not exist.
///
/// GET /api/productos/{id}
pub async fn show(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Option<Product>>> {
    let Path(id) = id?;
    let product = state.catalog().get(&ProductId::new(id)).await?;
    Ok(Json(product))
}

/// Add a product to the catalog.
///
/// POST /api/productos
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>)> {
    let Json(input) = body?;
    let product = state.catalog().insert(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Overwrite the supplied fields of a product.
///
/// PUT /api/productos/{id}
pub async fn update(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Json<ProductUpdate>, JsonRejection>,
) -> Result<Json<Product>> {
    let Path(id) = id?;
    let Json(update) = body?;
    let id = ProductId::new(id);

    state
        .catalog()
        .update(&id, update)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("producto {id}")))
}

/// Remove a product.
///
/// DELETE /api/productos/{id}
pub async fn destroy(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<StatusCode> {
    let Path(id) = id?;
    let id = ProductId::new(id);

    if state.catalog().remove(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("producto {id}")))
    }
}

/// Distinct categories in first-seen order.
///
/// GET /api/categorias
pub async fn categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog().categories().await)
}
