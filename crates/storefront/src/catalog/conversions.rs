//! Catalog API wire types and their conversion to domain products.

use serde::Deserialize;
use vitrina_core::{Price, Product, ProductId};

/// A product as returned by the catalog endpoint.
///
/// The endpoint also sends `category` and `rating`, which the storefront does
/// not use. Identifiers may arrive as numbers or strings.
#[derive(Debug, Deserialize)]
pub(super) struct ApiProduct {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    #[serde(default)]
    pub description: String,
}

impl From<ApiProduct> for Product {
    fn from(api: ApiProduct) -> Self {
        Self {
            // Same normalization as a `data-id` read back from the page
            id: ProductId::parse_attr(&api.id.to_string()),
            title: api.title,
            price: api.price,
            image: api.image,
            description: api.description,
        }
    }
}

/// Parse a catalog response body.
pub(super) fn parse_catalog(body: &str) -> Result<Vec<Product>, serde_json::Error> {
    let products: Vec<ApiProduct> = serde_json::from_str(body)?;
    Ok(products.into_iter().map(Product::from).collect())
}
