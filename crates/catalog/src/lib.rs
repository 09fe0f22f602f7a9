//! Product catalog microservice.
//!
//! Owns the authoritative in-memory product registry and exposes REST
//! endpoints for product creation, lookup, listing, and stock adjustment,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod store;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, patch, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use store::CatalogStore;

/// Creates the Axum application router with all routes and shared state.
///
/// `allowed_origin` is the single browser origin permitted by CORS.
pub fn create_app(
    store: CatalogStore,
    metrics_handle: PrometheusHandle,
    allowed_origin: HeaderValue,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/products", post(routes::products::create))
        .route("/products", get(routes::products::list))
        .route("/products/{id}", get(routes::products::get))
        .route("/products/{id}/stock", patch(routes::products::adjust_stock))
        .with_state(store)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(allowed_origin)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
