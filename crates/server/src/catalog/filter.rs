//! Catalog query engine.
//!
//! A [`ProductFilter`] is built once from the `categoria` / `busqueda` query
//! parameters and then evaluated either in memory ([`ProductFilter::matches`])
//! or by the database ([`SQL_PREDICATE`]). Both paths compare against text
//! lowercased by [`fold_case`] so they agree on every input, including
//! accented characters: the database never lowercases anything itself, it
//! only searches the shadow columns written from [`SearchColumns`].

use serde::Deserialize;

use crate::models::Product;

/// Category value the menu page sends when no category is selected.
pub const ALL_CATEGORIES: &str = "Categorías";

/// `WHERE` clause equivalent to [`ProductFilter::matches`].
///
/// Binds `$1` = [`ProductFilter::category`], `$2` = [`ProductFilter::needle`].
pub const SQL_PREDICATE: &str = "($1::text IS NULL OR categoria = $1) \
     AND ($2::text IS NULL \
          OR strpos(nombre_busqueda, $2) > 0 \
          OR EXISTS (SELECT 1 FROM unnest(ingredientes_busqueda) AS ing WHERE strpos(ing, $2) > 0))";

/// Raw query string of `GET /api/productos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub categoria: Option<String>,
    pub busqueda: Option<String>,
}

/// A normalized catalog filter. Both criteria must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProductFilter {
    category: Option<String>,
    needle: Option<String>,
}

impl ProductFilter {
    /// Filter that matches every product.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter from raw request values.
    ///
    /// Empty values, and the [`ALL_CATEGORIES`] sentinel for the category,
    /// disable the corresponding criterion.
    #[must_use]
    pub fn new(category: Option<&str>, search: Option<&str>) -> Self {
        let category = category
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
            .map(str::to_owned);
        let needle = search.filter(|s| !s.is_empty()).map(fold_case);
        Self { category, needle }
    }

    /// Exact category to match, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Case-folded search text, if any.
    #[must_use]
    pub fn needle(&self) -> Option<&str> {
        self.needle.as_deref()
    }

    /// Whether `product` satisfies the filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && product.category != *category
        {
            return false;
        }

        match &self.needle {
            None => true,
            Some(needle) => {
                fold_case(&product.name).contains(needle.as_str())
                    || product
                        .ingredients
                        .iter()
                        .any(|ingredient| fold_case(ingredient).contains(needle.as_str()))
            }
        }
    }
}

impl From<ProductQuery> for ProductFilter {
    fn from(query: ProductQuery) -> Self {
        Self::new(query.categoria.as_deref(), query.busqueda.as_deref())
    }
}

/// Case folding shared by both backends (full Unicode lowercase).
#[must_use]
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Case-folded copies of the searchable fields, persisted next to a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchColumns {
    pub name: String,
    pub ingredients: Vec<String>,
}

impl SearchColumns {
    #[must_use]
    pub fn new(name: &str, ingredients: &[String]) -> Self {
        Self {
            name: fold_case(name),
            ingredients: ingredients.iter().map(|i| fold_case(i)).collect(),
        }
    }
}
