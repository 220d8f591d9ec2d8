//! Order status.
//!
//! Orders are stamped with a terminal status when they are logged and never
//! transition afterwards, so the enum has a single variant. It stays an enum
//! so the wire value is spelled in exactly one place.

use serde::{Deserialize, Serialize};

/// Error returned when a stored status string is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid order status: {0}")]
pub struct OrderStatusError(pub String);

/// Status of a logged order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// The order was placed and paid at the counter.
    #[default]
    Completado,
}

impl OrderStatus {
    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completado => "completado",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = OrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completado" => Ok(Self::Completado),
            _ => Err(OrderStatusError(s.to_owned())),
        }
    }
}
