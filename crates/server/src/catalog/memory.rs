//! In-process catalog.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use cevicheria_core::ProductId;

use super::filter::ProductFilter;
use crate::models::{Product, ProductDraft, ProductUpdate};

/// Catalog held in process memory, in insertion order.
///
/// Identifiers come from a counter starting at 1. Writers are serialized by
/// the lock; readers get cloned snapshots.
#[derive(Debug)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
    next_id: AtomicU64,
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// A catalog pre-filled with `drafts`, numbered in order.
    #[must_use]
    pub fn seeded(drafts: impl IntoIterator<Item = ProductDraft>) -> Self {
        let catalog = Self::new();
        let products = drafts
            .into_iter()
            .map(|draft| Product::from_draft(catalog.allocate_id(), draft))
            .collect();
        Self {
            products: RwLock::new(products),
            next_id: catalog.next_id,
        }
    }

    fn allocate_id(&self) -> ProductId {
        ProductId::from_sequence(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    pub async fn insert(&self, draft: ProductDraft) -> Product {
        let mut products = self.products.write().await;
        let product = Product::from_draft(self.allocate_id(), draft);
        products.push(product.clone());
        product
    }

    pub async fn list(&self, filter: &ProductFilter) -> Vec<Product> {
        self.products
            .read()
            .await
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: &ProductId) -> Option<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == *id)
            .cloned()
    }

    pub async fn update(&self, id: &ProductId, update: ProductUpdate) -> Option<Product> {
        let mut products = self.products.write().await;
        let product = products.iter_mut().find(|p| p.id == *id)?;
        product.apply(update);
        Some(product.clone())
    }

    pub async fn remove(&self, id: &ProductId) -> bool {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != *id);
        products.len() != before
    }

    /// Distinct categories in first-seen order.
    pub async fn categories(&self) -> Vec<String> {
        let products = self.products.read().await;
        let mut categories: Vec<String> = Vec::new();
        for product in products.iter() {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cevicheria_core::Price;

    use super::*;
    use crate::models::NewProduct;

    fn draft(name: &str, category: &str) -> ProductDraft {
        NewProduct {
            name: Some(name.to_string()),
            price: Some(Price::from_units(12_500)),
            category: Some(category.to_string()),
            ..NewProduct::default()
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let catalog = InMemoryCatalog::new();
        let first = catalog.insert(draft("Ceviche Mixto", "Ceviche")).await;
        let second = catalog.insert(draft("Chupe", "Sopas")).await;

        assert_eq!(first.id.as_str(), "1");
        assert_eq!(second.id.as_str(), "2");
        assert_eq!(catalog.list(&ProductFilter::all()).await, vec![first, second]);
    }

    #[tokio::test]
    async fn test_seeded_continues_numbering() {
        let catalog = InMemoryCatalog::seeded([draft("A", "X"), draft("B", "Y")]);
        let next = catalog.insert(draft("C", "Z")).await;
        assert_eq!(next.id.as_str(), "3");
    }

    #[tokio::test]
    async fn test_inserted_product_is_found_by_its_category() {
        let catalog = InMemoryCatalog::new();
        let product = catalog.insert(draft("Ceviche Mixto", "Ceviche")).await;

        let found = catalog
            .list(&ProductFilter::new(Some("Ceviche"), None))
            .await;
        assert_eq!(found, vec![product]);

        let none = catalog.list(&ProductFilter::new(Some("Sopas"), None)).await;
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let catalog = InMemoryCatalog::new();
        for name in ["C", "A", "B"] {
            catalog.insert(draft(name, "X")).await;
        }
        let names: Vec<String> = catalog
            .list(&ProductFilter::all())
            .await
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn test_categories_are_distinct_in_first_seen_order() {
        let catalog = InMemoryCatalog::seeded([
            draft("Mixto", "Ceviche"),
            draft("Clásico", "Ceviche"),
            draft("Chupe", "Sopas"),
        ]);
        assert_eq!(catalog.categories().await, vec!["Ceviche", "Sopas"]);
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let catalog = InMemoryCatalog::seeded([draft("Mixto", "Ceviche")]);
        let id = ProductId::new("1");

        let updated = catalog
            .update(
                &id,
                ProductUpdate {
                    name: Some("Ceviche Clásico".to_string()),
                    ..ProductUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Ceviche Clásico");
        assert_eq!(updated.category, "Ceviche");

        assert!(catalog.update(&ProductId::new("99"), ProductUpdate::default()).await.is_none());
        assert!(catalog.remove(&id).await);
        assert!(!catalog.remove(&id).await);
        assert!(catalog.get(&id).await.is_none());
        assert!(catalog.list(&ProductFilter::all()).await.is_empty());
    }
}
