//! Products as listed by the catalog or authored in page markup.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product that can be added to the cart.
///
/// Read-only: the cart snapshots what it needs when a product is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Image URI.
    pub image: String,
    /// Only catalog products carry a description.
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Build a product authored in page markup.
    ///
    /// The identifier is derived from the title, see
    /// [`ProductId::for_static_title`].
    #[must_use]
    pub fn from_static(title: &str, price: Price, image: impl Into<String>) -> Self {
        Self {
            id: ProductId::for_static_title(title),
            title: title.trim().to_owned(),
            price,
            image: image.into(),
            description: String::new(),
        }
    }
}
