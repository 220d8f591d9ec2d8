//! Unified error handling with Sentry integration.
//!
//! Stores return [`StoreError`]; route handlers return `Result<T, AppError>`.
//! `AppError` captures server-side failures to Sentry and answers every
//! error with a JSON body of the form `{"message": "..."}`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::ValidationError;

/// Message returned to clients for any server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

/// Errors raised by the catalog, directory and order log.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input failed presence or shape checks.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The record being created already exists.
    #[error("{0}")]
    Conflict(String),

    /// The backing database failed.
    #[error("store error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Resource not found.
    #[error("No encontrado: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Store(StoreError::Validation(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(format!("Cuerpo de la solicitud inválido: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(format!("Parámetros inválidos: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(format!("Ruta inválida: {}", rejection.body_text()))
    }
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::Validation(_) | StoreError::Conflict(_)) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::Repository(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Don't expose internal error details to clients
        let message = if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
            self.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
