//! Catalog error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::ProductId;
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product exists with the given id.
    #[error("Product not found")]
    NotFound(ProductId),

    /// The adjustment would take the stock below zero.
    #[error("Not enough stock")]
    InsufficientStock {
        id: ProductId,
        stock: i64,
        delta: i64,
    },
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
