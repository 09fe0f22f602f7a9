//! The cart engine: validates products against the catalog, merges
//! quantities, and recomputes totals from current catalog prices.

use std::collections::HashMap;

use common::ProductId;

use crate::catalog_client::{CatalogClient, CatalogClientError};
use crate::error::CartError;
use crate::model::{Cart, CartItem};
use crate::store::CartStore;

/// Service that owns cart state and the pricing protocol.
pub struct CartEngine<C> {
    store: CartStore,
    catalog: C,
}

impl<C: CatalogClient> CartEngine<C> {
    /// Creates an engine with an empty cart store and the given catalog client.
    pub fn new(catalog: C) -> Self {
        Self {
            store: CartStore::new(),
            catalog,
        }
    }

    /// Creates an empty cart for a user; fails if one already exists.
    #[tracing::instrument(skip(self))]
    pub async fn create_cart(&self, user_id: &str) -> Result<Cart, CartError> {
        let cart = self.store.create(user_id).await?;
        metrics::counter!("cart_carts_created_total").increment(1);
        tracing::info!(user_id, "cart created");
        Ok(cart)
    }

    /// Returns a snapshot of a user's cart. No recomputation is triggered;
    /// the total is whatever the last successful add left behind.
    pub async fn get_cart(&self, user_id: &str) -> Result<Cart, CartError> {
        let entry = self.store.entry(user_id).await?;
        let cart = entry.lock().await;
        Ok(cart.clone())
    }

    /// Adds a quantity of a product to a user's cart and reprices it.
    ///
    /// The product must resolve in the catalog for the add to go through;
    /// that lookup is an existence check only, and the price that ends up
    /// in the total comes from the per-line lookups in
    /// [`recompute_total`](Self::recompute_total). The per-user lock is
    /// held across all outbound calls, so concurrent adds for the same
    /// user serialize.
    #[tracing::instrument(skip(self))]
    pub async fn add_item(
        &self,
        user_id: &str,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        let entry = self.store.entry(user_id).await?;
        let mut cart = entry.lock().await;

        match self.catalog.get_product(product_id).await {
            Ok(_) => {}
            Err(CatalogClientError::NotFound(id)) => {
                return Err(CartError::ProductNotFound(id));
            }
            Err(CatalogClientError::Unavailable(reason)) => {
                return Err(CartError::CatalogUnavailable(reason));
            }
        }

        cart.merge_item(product_id, quantity);
        cart.total = self.recompute_total(&cart.items).await;

        metrics::counter!("cart_items_added_total").increment(1);
        tracing::info!(user_id, %product_id, quantity, total = cart.total, "item added");
        Ok(cart.clone())
    }

    /// Re-derives the total from current catalog prices, one lookup per line.
    ///
    /// Policy: a line whose product no longer resolves is skipped — it
    /// stays in the cart with its quantity but contributes nothing to the
    /// total until a later add re-resolves it. This is the only place a
    /// failed catalog lookup is swallowed.
    async fn recompute_total(&self, items: &HashMap<ProductId, CartItem>) -> f64 {
        let mut total = 0.0;
        for (product_id, item) in items {
            match self.catalog.get_product(*product_id).await {
                Ok(product) => total += product.price * f64::from(item.quantity),
                Err(err) => {
                    tracing::warn!(%product_id, %err, "skipping unresolvable cart line");
                }
            }
        }
        total
    }
}
