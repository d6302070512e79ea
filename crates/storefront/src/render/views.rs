//! Display data for templates.
//!
//! Views hold pre-formatted strings so templates stay free of logic.

use vitrina_core::{CartLine, Product, format_amount};

/// Maximum characters of a catalog card title.
pub const CARD_TITLE_CHARS: usize = 50;
/// Maximum characters of a catalog card description.
pub const CARD_DESCRIPTION_CHARS: usize = 80;
/// Maximum characters of a cart row title.
pub const CART_TITLE_CHARS: usize = 40;

/// Catalog card display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    /// Full title, used as image alt text.
    pub alt: String,
    pub image: String,
    pub description: String,
    pub price: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: truncate_text(&product.title, CARD_TITLE_CHARS),
            alt: product.title.clone(),
            image: product.image.clone(),
            description: truncate_text(&product.description, CARD_DESCRIPTION_CHARS),
            price: product.price.to_string(),
        }
    }
}

/// Cart row display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRowView {
    pub id: String,
    pub title: String,
    pub alt: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub subtotal: String,
}

impl From<&CartLine> for CartRowView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            title: truncate_text(&line.title, CART_TITLE_CHARS),
            alt: line.title.clone(),
            image: line.image.clone(),
            price: line.price.to_string(),
            quantity: line.quantity.get(),
            subtotal: format_amount(line.subtotal()),
        }
    }
}

/// Cut `text` to `max_chars` characters, appending `...` when anything was cut.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", text.split_at(end).0),
        None => text.to_owned(),
    }
}
