//! Order log types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use cevicheria_core::{Email, OrderId, OrderStatus, Price};

use super::{ValidationError, non_empty};

/// A logged order. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "usuarioEmail")]
    pub user_email: Email,
    /// Line items as sent by the client; not interpreted by the backend.
    #[serde(rename = "productos")]
    pub items: Value,
    pub total: Price,
    #[serde(rename = "fecha")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "estado")]
    pub status: OrderStatus,
}

impl Order {
    /// Stamp a validated order with its id, creation time and status.
    #[must_use]
    pub fn stamp(draft: OrderDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: OrderId::from_timestamp_millis(created_at.timestamp_millis()),
            user_email: draft.user_email,
            items: draft.items,
            total: draft.total,
            created_at,
            status: OrderStatus::Completado,
        }
    }
}

/// A validated order that has not been stamped yet.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub user_email: Email,
    pub items: Value,
    pub total: Price,
}

/// Request body for placing an order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewOrder {
    #[serde(rename = "usuarioEmail")]
    pub user_email: Option<String>,
    #[serde(rename = "productos")]
    pub items: Option<Value>,
    pub total: Option<Price>,
}

impl NewOrder {
    /// Check the owner email and fill in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] when `usuarioEmail` is
    /// absent and [`ValidationError::InvalidEmail`] when it is blank or too long.
    pub fn validate(self) -> Result<OrderDraft, ValidationError> {
        let raw = non_empty(self.user_email)
            .ok_or(ValidationError::MissingFields(vec!["usuarioEmail"]))?;

        Ok(OrderDraft {
            user_email: Email::parse(&raw)?,
            items: self.items.unwrap_or_else(|| Value::Array(Vec::new())),
            total: self.total.unwrap_or(Price::ZERO),
        })
    }
}
