//! Cart domain types.

use std::collections::HashMap;

use common::ProductId;
use serde::{Deserialize, Serialize};

/// A single line in a cart.
///
/// Quantity accumulates when the same product is added again; the item
/// carries no price — pricing always comes from the catalog at add-time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A per-user cart: item lines keyed by product id plus a derived total.
///
/// The total is a point-in-time snapshot computed from catalog prices at
/// the last successful add; it is never settable independently and goes
/// stale if catalog prices change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub user_id: String,
    pub items: HashMap<ProductId, CartItem>,
    pub total: f64,
}

impl Cart {
    /// Creates an empty cart for a user.
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            items: HashMap::new(),
            total: 0.0,
        }
    }

    /// Merges a quantity into the cart: increments the existing line for
    /// the product, or inserts a new one.
    pub fn merge_item(&mut self, product_id: ProductId, quantity: u32) {
        self.items
            .entry(product_id)
            .and_modify(|item| item.quantity += quantity)
            .or_insert(CartItem {
                product_id,
                quantity,
            });
    }
}
