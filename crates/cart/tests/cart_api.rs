//! Integration tests for the cart service API, driven against an
//! in-memory catalog client.

use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use cart::CartEngine;
use cart::catalog_client::InMemoryCatalogClient;
use cart::routes::carts::AppState;
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> (axum::Router, InMemoryCatalogClient) {
    let catalog = InMemoryCatalogClient::new();
    let state = Arc::new(AppState {
        engine: CartEngine::new(catalog.clone()),
    });
    let app = cart::create_app(
        state,
        get_metrics_handle(),
        "http://localhost:3000".parse().unwrap(),
    );
    (app, catalog)
}

async fn body_bytes(response: axum::response::Response) -> axum::body::Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn create_cart_request(user_id: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/carts/{user_id}"))
        .body(Body::empty())
        .unwrap()
}

fn add_item_request(user_id: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/carts/{user_id}/items"))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_cart_request(user_id: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/carts/{user_id}"))
        .body(Body::empty())
        .unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_create_cart_returns_empty_cart() {
    let (app, _) = setup();

    let response = app.oneshot(create_cart_request("alice")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user_id"], "alice");
    assert_eq!(json["total"], 0.0);
    assert!(json["items"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_cart_rejected() {
    let (app, _) = setup();

    app.clone().oneshot(create_cart_request("alice")).await.unwrap();
    let response = app.oneshot(create_cart_request("alice")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Cart already exists");
}

#[tokio::test]
async fn test_get_missing_cart() {
    let (app, _) = setup();

    let response = app.oneshot(get_cart_request("nobody")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_item_scenario() {
    let (app, catalog) = setup();
    let widget = catalog.add_product("Widget", 9.99, 10);

    app.clone().oneshot(create_cart_request("alice")).await.unwrap();

    let response = app
        .clone()
        .oneshot(add_item_request(
            "alice",
            serde_json::json!({ "product_id": widget.id, "quantity": 2 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["items"]["1"]["quantity"], 2);
    assert_close(json["total"].as_f64().unwrap(), 19.98);

    let response = app
        .oneshot(add_item_request(
            "alice",
            serde_json::json!({ "product_id": widget.id, "quantity": 3 }),
        ))
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["items"]["1"]["quantity"], 5);
    assert_close(json["total"].as_f64().unwrap(), 49.95);
}

#[tokio::test]
async fn test_add_item_defaults_quantity_to_one() {
    let (app, catalog) = setup();
    let widget = catalog.add_product("Widget", 4.0, 10);

    app.clone().oneshot(create_cart_request("alice")).await.unwrap();

    let response = app
        .oneshot(add_item_request(
            "alice",
            serde_json::json!({ "product_id": widget.id }),
        ))
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["items"]["1"]["quantity"], 1);
    assert_close(json["total"].as_f64().unwrap(), 4.0);
}

#[tokio::test]
async fn test_add_unknown_product() {
    let (app, _) = setup();

    app.clone().oneshot(create_cart_request("alice")).await.unwrap();

    let response = app
        .oneshot(add_item_request(
            "alice",
            serde_json::json!({ "product_id": 99 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Product not found");
}

#[tokio::test]
async fn test_add_item_to_missing_cart() {
    let (app, catalog) = setup();
    let widget = catalog.add_product("Widget", 9.99, 10);

    let response = app
        .oneshot(add_item_request(
            "nobody",
            serde_json::json!({ "product_id": widget.id }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Cart not found");
}

#[tokio::test]
async fn test_unavailable_catalog_maps_to_bad_gateway() {
    let (app, catalog) = setup();
    let widget = catalog.add_product("Widget", 9.99, 10);

    app.clone().oneshot(create_cart_request("alice")).await.unwrap();
    catalog.set_unavailable(true);

    let response = app
        .oneshot(add_item_request(
            "alice",
            serde_json::json!({ "product_id": widget.id }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_get_cart_is_idempotent() {
    let (app, catalog) = setup();
    let widget = catalog.add_product("Widget", 9.99, 10);

    app.clone().oneshot(create_cart_request("alice")).await.unwrap();
    app.clone()
        .oneshot(add_item_request(
            "alice",
            serde_json::json!({ "product_id": widget.id, "quantity": 2 }),
        ))
        .await
        .unwrap();

    let first = app.clone().oneshot(get_cart_request("alice")).await.unwrap();
    let second = app.oneshot(get_cart_request("alice")).await.unwrap();

    let first = body_bytes(first).await;
    let second = body_bytes(second).await;
    assert_eq!(first, second);
}
