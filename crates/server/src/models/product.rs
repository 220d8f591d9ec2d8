//! Catalog product types.

use serde::{Deserialize, Serialize};

use cevicheria_core::{Price, ProductId};

use super::{ValidationError, non_empty};

/// Stock assigned when a new product does not specify one.
pub const DEFAULT_STOCK: u32 = 10;

/// A product on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: Price,
    #[serde(rename = "categoria")]
    pub category: String,
    pub stock: u32,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "ingredientes")]
    pub ingredients: Vec<String>,
}

impl Product {
    /// Attach an identifier to a validated draft.
    #[must_use]
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            category: draft.category,
            stock: draft.stock,
            description: draft.description,
            ingredients: draft.ingredients,
        }
    }

    /// Overwrite the fields present in `update`, leaving the rest untouched.
    pub fn apply(&mut self, update: ProductUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(ingredients) = update.ingredients {
            self.ingredients = ingredients;
        }
    }
}

/// A validated product that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Price,
    pub category: String,
    pub stock: u32,
    pub description: String,
    pub ingredients: Vec<String>,
}

/// Request body for creating a product.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProduct {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "precio")]
    pub price: Option<Price>,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    pub stock: Option<u32>,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "ingredientes")]
    pub ingredients: Option<Vec<String>>,
}

impl NewProduct {
    /// Check required fields and fill in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] listing every required
    /// field (`nombre`, `precio`, `categoria`) that is absent or empty.
    pub fn validate(self) -> Result<ProductDraft, ValidationError> {
        let name = non_empty(self.name);
        let category = non_empty(self.category);

        match (name, self.price, category) {
            (Some(name), Some(price), Some(category)) => Ok(ProductDraft {
                name,
                price,
                category,
                stock: self.stock.unwrap_or(DEFAULT_STOCK),
                description: self.description.unwrap_or_default(),
                ingredients: self.ingredients.unwrap_or_default(),
            }),
            (name, price, category) => {
                let mut missing = Vec::new();
                if name.is_none() {
                    missing.push("nombre");
                }
                if price.is_none() {
                    missing.push("precio");
                }
                if category.is_none() {
                    missing.push("categoria");
                }
                Err(ValidationError::MissingFields(missing))
            }
        }
    }
}

/// Request body for a partial product update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "precio")]
    pub price: Option<Price>,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    pub stock: Option<u32>,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "ingredientes")]
    pub ingredients: Option<Vec<String>>,
}
