//! Shopping cart microservice.
//!
//! Holds per-user cart state in memory and prices every cart mutation
//! against the catalog service over HTTP, with structured logging
//! (tracing) and Prometheus metrics.

pub mod catalog_client;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use catalog_client::CatalogClient;
use routes::carts::AppState;

pub use engine::CartEngine;

/// Creates the Axum application router with all routes and shared state.
///
/// `allowed_origin` is the single browser origin permitted by CORS.
pub fn create_app<C: CatalogClient + 'static>(
    state: Arc<AppState<C>>,
    metrics_handle: PrometheusHandle,
    allowed_origin: HeaderValue,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/carts/{user_id}", post(routes::carts::create::<C>))
        .route("/carts/{user_id}", get(routes::carts::get::<C>))
        .route("/carts/{user_id}/items", post(routes::carts::add_item::<C>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(allowed_origin)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
