//! Domain models for the ordering backend.
//!
//! Each model comes with explicit input types whose fields are all optional,
//! so presence checks and defaults happen in one place instead of in every
//! handler.

pub mod order;
pub mod product;
pub mod user;

use cevicheria_core::EmailError;
use thiserror::Error;

pub use order::{NewOrder, Order, OrderDraft};
pub use product::{NewProduct, Product, ProductDraft, ProductUpdate};
pub use user::{NewProfile, ProfileUpdate, UserProfile};

/// Input rejected before it reaches a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields were absent or empty.
    #[error("Faltan campos requeridos: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The email key is blank or too long.
    #[error("Email inválido: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Treat absent and empty strings the same way.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
