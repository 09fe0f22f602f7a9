//! In-memory cart storage keyed by user id.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::error::CartError;
use crate::model::Cart;

/// Per-user cart storage, held in process memory.
///
/// Each cart sits behind its own async mutex. Callers that mutate a cart
/// hold that mutex for the whole read-modify-write, including any outbound
/// calls in between, so two concurrent mutations for the same user
/// serialize instead of overwriting each other's updates.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    carts: Arc<RwLock<HashMap<String, Arc<Mutex<Cart>>>>>,
}

impl CartStore {
    /// Creates a new empty cart store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cart for the user; fails if one already exists.
    pub async fn create(&self, user_id: &str) -> Result<Cart, CartError> {
        let mut carts = self.carts.write().await;
        if carts.contains_key(user_id) {
            return Err(CartError::CartAlreadyExists(user_id.to_string()));
        }

        let cart = Cart::empty(user_id);
        carts.insert(user_id.to_string(), Arc::new(Mutex::new(cart.clone())));
        Ok(cart)
    }

    /// Returns the lockable entry for a user's cart.
    pub async fn entry(&self, user_id: &str) -> Result<Arc<Mutex<Cart>>, CartError> {
        let carts = self.carts.read().await;
        carts
            .get(user_id)
            .cloned()
            .ok_or_else(|| CartError::CartNotFound(user_id.to_string()))
    }
}
