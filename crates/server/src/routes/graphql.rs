//! GraphQL endpoint for the product board.

use async_graphql::http::GraphiQLSource;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Html,
};

use crate::error::Result;
use crate::state::AppState;

/// Execute a GraphQL request.
///
/// POST /graphql
pub async fn execute(
    State(state): State<AppState>,
    body: std::result::Result<Json<async_graphql::Request>, JsonRejection>,
) -> Result<Json<async_graphql::Response>> {
    let Json(request) = body?;
    Ok(Json(state.schema().execute(request).await))
}

/// Interactive GraphiQL playground.
///
/// GET /graphql
pub async fn playground() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
