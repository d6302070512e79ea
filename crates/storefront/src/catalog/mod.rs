//! Catalog source: the product list shown in the storefront grid.
//!
//! # Architecture
//!
//! - [`CatalogSource`] is the seam the storefront depends on
//! - [`CatalogClient`] fetches the catalog over HTTP with `reqwest`
//! - One request per call, no retry and no cache; the storefront fetches once
//!   at startup and degrades to an empty grid on failure
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrina_storefront::catalog::{CatalogClient, CatalogSource};
//!
//! let client = CatalogClient::new(config.catalog_url.clone());
//! let products = client.fetch_catalog(8).await?;
//! ```

mod client;
mod conversions;

pub use client::CatalogClient;

use reqwest::StatusCode;
use thiserror::Error;
use vitrina_core::Product;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Catalog returned HTTP {status}: {body}")]
    Status {
        status: StatusCode,
        /// First characters of the response body.
        body: String,
    },

    /// The response body was not a product list.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of the product catalog.
pub trait CatalogSource {
    /// Fetch at most `limit` products, in catalog order.
    fn fetch_catalog(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Product>, NetworkError>> + Send;
}

/// A catalog served from memory.
///
/// Used where no remote catalog exists (static-only pages) and in tests.
#[derive(Debug, Clone, Default)]
pub struct FixedCatalog {
    products: Vec<Product>,
}

impl FixedCatalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl CatalogSource for FixedCatalog {
    async fn fetch_catalog(&self, limit: u32) -> Result<Vec<Product>, NetworkError> {
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self.products.iter().take(limit).cloned().collect())
    }
}
