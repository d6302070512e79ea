//! Render layer: pure projections of catalog and cart state to HTML.
//!
//! Renderers never mutate state. Each one produces the full contents of a
//! [`Slot`], which the storefront hands to a [`Surface`] to replace wholesale.
//! Templates live in the crate's `templates/` directory.

mod views;

pub use views::{
    CARD_DESCRIPTION_CHARS, CARD_TITLE_CHARS, CART_TITLE_CHARS, CartRowView, ProductCardView,
    truncate_text,
};

use std::collections::HashMap;

use askama::Template;
use thiserror::Error;
use vitrina_core::{Cart, Product, format_amount};

use crate::notify::{Toast, ToastPhase};

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Regions of the page the storefront renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Catalog cards fetched from the API.
    ProductGrid,
    /// Cart rows, or the empty-state message.
    CartItems,
    /// Cart total amount.
    CartTotal,
    /// Item count badge in the header.
    CartBadge,
    /// The current toast.
    Toast,
}

impl Slot {
    pub const ALL: [Self; 5] = [
        Self::ProductGrid,
        Self::CartItems,
        Self::CartTotal,
        Self::CartBadge,
        Self::Toast,
    ];
}

/// Where rendered HTML ends up.
pub trait Surface {
    /// Replace the contents of `slot` with `html`.
    ///
    /// Returns `false` if the surface has no such slot; the content is dropped.
    fn mount(&mut self, slot: Slot, html: String) -> bool;
}

/// An in-memory page: a map of slots to their current HTML.
#[derive(Debug, Clone)]
pub struct HtmlSurface {
    title: String,
    slots: HashMap<Slot, String>,
}

impl Default for HtmlSurface {
    fn default() -> Self {
        Self::new("Vitrina")
    }
}

impl HtmlSurface {
    /// Create a surface with every slot present and empty.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slots: Slot::ALL.into_iter().map(|slot| (slot, String::new())).collect(),
        }
    }

    /// Drop `slot` from the surface, as if its element were missing.
    #[must_use]
    pub fn without(mut self, slot: Slot) -> Self {
        self.slots.remove(&slot);
        self
    }

    /// Current contents of `slot`, or `None` if the slot is missing.
    #[must_use]
    pub fn content(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    /// Compose the whole page from the current slot contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the page template fails to render.
    pub fn page(&self) -> Result<String, RenderError> {
        let get = |slot| self.content(slot).unwrap_or_default();
        let page = PageTemplate {
            title: &self.title,
            badge: get(Slot::CartBadge),
            grid: get(Slot::ProductGrid),
            cart_items: get(Slot::CartItems),
            total: get(Slot::CartTotal),
            toast: get(Slot::Toast),
        };
        Ok(page.render()?)
    }
}

impl Surface for HtmlSurface {
    fn mount(&mut self, slot: Slot, html: String) -> bool {
        match self.slots.get_mut(&slot) {
            Some(content) => {
                *content = html;
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Catalog grid template.
#[derive(Template)]
#[template(path = "catalog/grid.html")]
pub struct CatalogGridTemplate {
    pub cards: Vec<ProductCardView>,
}

/// Cart rows template.
#[derive(Template)]
#[template(path = "cart/items.html")]
pub struct CartItemsTemplate {
    pub rows: Vec<CartRowView>,
}

/// Cart count badge template.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Toast template.
#[derive(Template)]
#[template(path = "partials/toast.html")]
pub struct ToastTemplate<'a> {
    pub message: &'a str,
    pub kind: &'static str,
    pub visible: bool,
}

/// Inline form error template.
#[derive(Template)]
#[template(path = "partials/field_error.html")]
pub struct FieldErrorTemplate<'a> {
    pub field: &'a str,
    pub message: &'a str,
}

/// Full page layout.
#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    title: &'a str,
    badge: &'a str,
    grid: &'a str,
    cart_items: &'a str,
    total: &'a str,
    toast: &'a str,
}

// =============================================================================
// Renderers
// =============================================================================

/// Render one card per catalog product.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_catalog(products: &[Product]) -> Result<String, RenderError> {
    let cards = products.iter().map(ProductCardView::from).collect();
    Ok(CatalogGridTemplate { cards }.render()?)
}

/// Render the cart rows, or the empty-state message for an empty cart.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_cart_items(cart: &Cart) -> Result<String, RenderError> {
    let rows = cart.lines().iter().map(CartRowView::from).collect();
    Ok(CartItemsTemplate { rows }.render()?)
}

/// Render the cart total (`"0.00"` for an empty cart).
#[must_use]
pub fn render_cart_total(cart: &Cart) -> String {
    format_amount(cart.total())
}

/// Render the item count badge, hidden when the count is zero.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_badge(count: u64) -> Result<String, RenderError> {
    Ok(CartCountTemplate { count }.render()?)
}

/// Render the current toast; nothing once it has been removed.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_toast(toast: Option<&Toast>) -> Result<String, RenderError> {
    let Some(toast) = toast.filter(|toast| toast.phase != ToastPhase::Removed) else {
        return Ok(String::new());
    };

    Ok(ToastTemplate {
        message: &toast.message,
        kind: toast.kind.as_str(),
        visible: toast.phase == ToastPhase::Visible,
    }
    .render()?)
}

/// Render the inline error shown after a form field.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_field_error(field: &str, message: &str) -> Result<String, RenderError> {
    Ok(FieldErrorTemplate { field, message }.render()?)
}
