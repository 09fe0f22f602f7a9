//! In-memory product registry.

use std::collections::HashMap;
use std::sync::Arc;

use common::{Product, ProductId};
use tokio::sync::RwLock;

use crate::error::CatalogError;

/// Stock level assigned when a creation request omits one.
pub const DEFAULT_STOCK: i64 = 10;

#[derive(Debug)]
struct CatalogState {
    products: HashMap<ProductId, Product>,
    next_id: u64,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            products: HashMap::new(),
            next_id: 1,
        }
    }
}

/// Authoritative product registry, held in process memory.
///
/// Cloning is cheap; all clones share the same state. Creation and stock
/// adjustment take the write lock, so id assignment stays monotonic and
/// the stock check-and-apply is atomic under concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    state: Arc<RwLock<CatalogState>>,
}

impl CatalogStore {
    /// Creates a new empty catalog store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new product under the next sequential id and returns it.
    ///
    /// Ids start at 1, never repeat, and are never reclaimed (products
    /// cannot be deleted).
    pub async fn create(&self, name: String, price: f64, stock: i64) -> Product {
        let mut state = self.state.write().await;
        let id = ProductId::new(state.next_id);
        state.next_id += 1;

        let product = Product {
            id,
            name,
            price,
            stock,
        };
        state.products.insert(id, product.clone());
        product
    }

    /// Returns a snapshot of every product, in arbitrary order.
    pub async fn list(&self) -> Vec<Product> {
        let state = self.state.read().await;
        state.products.values().cloned().collect()
    }

    /// Looks up a single product by id.
    pub async fn get(&self, id: ProductId) -> Result<Product, CatalogError> {
        let state = self.state.read().await;
        state
            .products
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    /// Applies `stock += delta`, rejecting adjustments that would take the
    /// stock below zero. A rejected adjustment leaves the record untouched.
    pub async fn adjust_stock(&self, id: ProductId, delta: i64) -> Result<Product, CatalogError> {
        let mut state = self.state.write().await;
        let product = state
            .products
            .get_mut(&id)
            .ok_or(CatalogError::NotFound(id))?;

        if product.stock + delta < 0 {
            return Err(CatalogError::InsufficientStock {
                id,
                stock: product.stock,
                delta,
            });
        }

        product.stock += delta;
        Ok(product.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_sequential_and_unique() {
        let store = CatalogStore::new();
        let a = store.create("a".into(), 1.0, DEFAULT_STOCK).await;
        let b = store.create("b".into(), 2.0, DEFAULT_STOCK).await;
        let c = store.create("c".into(), 3.0, DEFAULT_STOCK).await;

        assert_eq!(a.id.as_u64(), 1);
        assert_eq!(b.id.as_u64(), 2);
        assert_eq!(c.id.as_u64(), 3);
    }

    #[tokio::test]
    async fn get_unknown_product_fails() {
        let store = CatalogStore::new();
        let err = store.get(ProductId::new(99)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn adjust_stock_applies_delta() {
        let store = CatalogStore::new();
        let product = store.create("widget".into(), 9.99, 10).await;

        let updated = store.adjust_stock(product.id, -4).await.unwrap();
        assert_eq!(updated.stock, 6);

        let updated = store.adjust_stock(product.id, 10).await.unwrap();
        assert_eq!(updated.stock, 16);
    }

    #[tokio::test]
    async fn adjust_stock_rejection_leaves_stock_unchanged() {
        let store = CatalogStore::new();
        let product = store.create("widget".into(), 9.99, 3).await;

        let err = store.adjust_stock(product.id, -4).await.unwrap_err();
        assert!(matches!(err, CatalogError::InsufficientStock { .. }));

        let current = store.get(product.id).await.unwrap();
        assert_eq!(current.stock, 3);
    }

    #[tokio::test]
    async fn list_returns_all_products() {
        let store = CatalogStore::new();
        store.create("a".into(), 1.0, 1).await;
        store.create("b".into(), 2.0, 2).await;

        let mut products = store.list().await;
        products.sort_by_key(|p| p.id);
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "a");
        assert_eq!(products[1].name, "b");
    }
}
