//! Cart error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::ProductId;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No cart exists for the user.
    #[error("Cart not found")]
    CartNotFound(String),

    /// A cart already exists for the user.
    #[error("Cart already exists")]
    CartAlreadyExists(String),

    /// The product being added does not exist in the catalog.
    #[error("Product not found")]
    ProductNotFound(ProductId),

    /// The catalog service could not be reached while validating the
    /// product being added.
    #[error("Catalog service unavailable: {0}")]
    CatalogUnavailable(String),
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            CartError::CartNotFound(_) | CartError::ProductNotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            CartError::CartAlreadyExists(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            CartError::CatalogUnavailable(_) => {
                tracing::error!(error = %self, "catalog lookup failed");
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
