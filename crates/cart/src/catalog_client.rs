//! Catalog lookup client: trait, HTTP implementation, and an in-memory
//! implementation for tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::{Product, ProductId};
use thiserror::Error;

/// Timeout applied to every outbound catalog call.
pub const CATALOG_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from a catalog lookup.
///
/// `NotFound` means the catalog answered and the product does not exist;
/// `Unavailable` covers everything else — connection failure, timeout,
/// unexpected status, malformed body.
#[derive(Debug, Error)]
pub enum CatalogClientError {
    #[error("product {0} not found in catalog")]
    NotFound(ProductId),

    #[error("catalog unreachable: {0}")]
    Unavailable(String),
}

/// Trait for looking up products in the catalog service.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetches the current record for a product.
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogClientError>;
}

/// Catalog client backed by HTTP calls to the catalog service.
///
/// Holds one pooled `reqwest::Client`; every request carries a 5 second
/// timeout, and a timeout is reported the same way as a connection failure.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    /// Creates a client for the catalog service at `base_url`
    /// (e.g. `"http://localhost:8001"`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(CATALOG_TIMEOUT)
            .build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogClientError> {
        let url = format!("{}/products/{}", self.base_url, id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogClientError::Unavailable(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogClientError::NotFound(id));
        }
        if !response.status().is_success() {
            return Err(CatalogClientError::Unavailable(format!(
                "catalog returned {}",
                response.status()
            )));
        }

        response
            .json::<Product>()
            .await
            .map_err(|e| CatalogClientError::Unavailable(e.to_string()))
    }
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    products: HashMap<ProductId, Product>,
    next_id: u64,
    unavailable: bool,
}

/// In-memory catalog client for testing.
///
/// Supports removing products and simulating an unreachable catalog, so
/// tests can exercise the cart engine's drift and failure paths without a
/// running catalog service.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogClient {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalogClient {
    /// Creates a new empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product under the next sequential id and returns it.
    pub fn add_product(&self, name: &str, price: f64, stock: i64) -> Product {
        let mut state = self.state.write().unwrap();
        state.next_id += 1;
        let product = Product {
            id: ProductId::new(state.next_id),
            name: name.to_string(),
            price,
            stock,
        };
        state.products.insert(product.id, product.clone());
        product
    }

    /// Removes a product, simulating catalog drift between lookups.
    pub fn remove_product(&self, id: ProductId) {
        self.state.write().unwrap().products.remove(&id);
    }

    /// Configures the client to fail every lookup as unavailable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.write().unwrap().unavailable = unavailable;
    }
}

#[async_trait]
impl CatalogClient for InMemoryCatalogClient {
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogClientError> {
        let state = self.state.read().unwrap();
        if state.unavailable {
            return Err(CatalogClientError::Unavailable(
                "connection refused".to_string(),
            ));
        }
        state
            .products
            .get(&id)
            .cloned()
            .ok_or(CatalogClientError::NotFound(id))
    }
}
