//! Order route handlers.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use cevicheria_core::Email;

use crate::error::Result;
use crate::models::{NewOrder, Order, ValidationError};
use crate::state::AppState;

/// Orders placed by a user.
///
/// GET /api/pedidos/{email}
pub async fn index(
    State(state): State<AppState>,
    email: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Order>>> {
    let Path(email) = email?;
    let email = Email::parse(&email).map_err(ValidationError::from)?;
    let orders = state.orders().list_for_user(&email).await?;
    Ok(Json(orders))
}

/// Place an order. It is recorded as completed.
///
/// POST /api/pedidos
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<NewOrder>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>)> {
    let Json(input) = body?;
    let order = state.orders().append(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
