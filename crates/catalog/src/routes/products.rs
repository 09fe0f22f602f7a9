//! Product CRUD and stock adjustment endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::{Product, ProductId};
use serde::Deserialize;

use crate::error::CatalogError;
use crate::store::{CatalogStore, DEFAULT_STOCK};

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    #[serde(default = "default_stock")]
    pub stock: i64,
}

fn default_stock() -> i64 {
    DEFAULT_STOCK
}

#[derive(Debug, Deserialize)]
pub struct StockAdjustment {
    /// Signed delta applied to the current stock level.
    pub quantity: i64,
}

/// POST /products — register a new product.
#[tracing::instrument(skip(store, req), fields(name = %req.name))]
pub async fn create(
    State(store): State<CatalogStore>,
    Json(req): Json<CreateProductRequest>,
) -> (StatusCode, Json<Product>) {
    let product = store.create(req.name, req.price, req.stock).await;
    metrics::counter!("catalog_products_created_total").increment(1);
    tracing::info!(id = %product.id, "product created");
    (StatusCode::CREATED, Json(product))
}

/// GET /products — list all products.
#[tracing::instrument(skip(store))]
pub async fn list(State(store): State<CatalogStore>) -> Json<Vec<Product>> {
    Json(store.list().await)
}

/// GET /products/{id} — look up a single product.
#[tracing::instrument(skip(store))]
pub async fn get(
    State(store): State<CatalogStore>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, CatalogError> {
    let product = store.get(ProductId::new(id)).await?;
    Ok(Json(product))
}

/// PATCH /products/{id}/stock?quantity={delta} — adjust stock by a signed delta.
#[tracing::instrument(skip(store))]
pub async fn adjust_stock(
    State(store): State<CatalogStore>,
    Path(id): Path<u64>,
    Query(adjustment): Query<StockAdjustment>,
) -> Result<Json<Product>, CatalogError> {
    let product = store
        .adjust_stock(ProductId::new(id), adjustment.quantity)
        .await?;
    metrics::counter!("catalog_stock_adjustments_total").increment(1);
    Ok(Json(product))
}
