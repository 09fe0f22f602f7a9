//! Cart creation, item addition, and lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::ProductId;
use serde::Deserialize;

use crate::catalog_client::CatalogClient;
use crate::engine::CartEngine;
use crate::error::CartError;
use crate::model::Cart;

/// Shared application state accessible from all handlers.
pub struct AppState<C: CatalogClient> {
    pub engine: CartEngine<C>,
}

#[derive(Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// POST /carts/{user_id} — create an empty cart for a user.
#[tracing::instrument(skip(state))]
pub async fn create<C: CatalogClient + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Path(user_id): Path<String>,
) -> Result<Json<Cart>, CartError> {
    let cart = state.engine.create_cart(&user_id).await?;
    Ok(Json(cart))
}

/// POST /carts/{user_id}/items — add a product to a cart and reprice it.
#[tracing::instrument(skip(state, req))]
pub async fn add_item<C: CatalogClient + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Path(user_id): Path<String>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<Cart>, CartError> {
    let cart = state
        .engine
        .add_item(&user_id, req.product_id, req.quantity)
        .await?;
    Ok(Json(cart))
}

/// GET /carts/{user_id} — return the current cart snapshot.
#[tracing::instrument(skip(state))]
pub async fn get<C: CatalogClient + 'static>(
    State(state): State<Arc<AppState<C>>>,
    Path(user_id): Path<String>,
) -> Result<Json<Cart>, CartError> {
    let cart = state.engine.get_cart(&user_id).await?;
    Ok(Json(cart))
}
