//! Types shared across the catalog and cart service boundaries.

pub mod types;

pub use types::{Product, ProductId};
