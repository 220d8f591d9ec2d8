//! User profile route handlers.

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
use crate::models::{NewProfile, ProfileUpdate, UserProfile, ValidationError};
use crate::state::AppState;

fn parse_email(raw: &str) -> Result<Email> {
    Email::parse(raw).map_err(|e| ValidationError::from(e).into())
}

/// Get a profile, creating one with default values on first access.
///
/// GET /api/usuarios/{email}
pub async fn show(
    State(state): State<AppState>,
    email: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<UserProfile>> {
    let Path(email) = email?;
    let email = parse_email(&email)?;
    let profile = state.directory().get_or_create(&email).await?;
    Ok(Json(profile))
}

/// Register a profile. Rejected when the email is already known.
///
/// POST /api/usuarios
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<NewProfile>, JsonRejection>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    let Json(input) = body?;
    let profile = state.directory().create(input).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Merge the supplied, non-empty fields into the profile.
///
/// PUT /api/usuarios/{email}
pub async fn update(
    State(state): State<AppState>,
    email: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<UserProfile>> {
    let Path(email) = email?;
    let email = parse_email(&email)?;
    let Json(update) = body?;
    let profile = state.directory().upsert(&email, &update).await?;
    Ok(Json(profile))
}
