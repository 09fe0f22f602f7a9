use serde::{Deserialize, Serialize};

/// Identifier for a product in the catalog.
///
/// Wraps the sequential id assigned by the catalog service to provide
/// type safety and prevent mixing product ids up with quantities or
/// other integers on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Creates a product ID from a raw id value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying id value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for u64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// A catalog product as it travels between the services.
///
/// The catalog service owns the authoritative record; the cart service
/// only ever holds transient copies returned from lookups. Price is a
/// double-precision decimal, consistent across both services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub stock: i64,
}
