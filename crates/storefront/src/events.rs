//! Event router: turns what the visitor did into what the cart should do.
//!
//! Surfaces report [`UiEvent`]s carrying plain data (identifiers from
//! `data-id` attributes, text read from card elements, raw field values).
//! [`EventRouter::route`] maps each event to an [`Intent`] without touching
//! any state; [`Intent::apply`] performs it against the cart engine.
//!
//! Catalog cards are identified by their catalog identifier. Statically
//! authored cards have none, so their identifier is derived from the title
//! (see [`ProductId::for_static_title`]): two cards with the same title add to
//! the same cart line.

use thiserror::Error;
use vitrina_core::{Price, PriceError, Product, ProductId, requested_quantity};

use crate::cart::{CartEngine, CartOutcome};
use crate::forms::Form;
use crate::storage::KeyValueStore;

/// Errors that can occur while routing an event.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A catalog card referenced a product that is not in the loaded catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// A static card lacks an element needed to build a product.
    #[error("Malformed product card: missing {0}")]
    MalformedCard(&'static str),

    /// A static card's price text could not be parsed.
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),
}

/// Content read from a statically authored product card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCard {
    /// Text of the card's heading.
    pub heading: Option<String>,
    /// Text of the card's last paragraph, e.g. `"Price: $1,500"`.
    pub price_text: Option<String>,
    /// Resolved source of the card's image.
    pub image_src: Option<String>,
}

impl StaticCard {
    /// Build the product this card shows.
    ///
    /// # Errors
    ///
    /// Returns an error if the heading or price is missing, or the price text
    /// holds no valid amount.
    pub fn to_product(&self) -> Result<Product, RouteError> {
        let title = self
            .heading
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .ok_or(RouteError::MalformedCard("heading"))?;
        let price_text = self
            .price_text
            .as_deref()
            .ok_or(RouteError::MalformedCard("price"))?;
        let price = Price::parse_loose(price_text)?;

        Ok(Product::from_static(
            title,
            price,
            self.image_src.clone().unwrap_or_default(),
        ))
    }
}

/// Something the visitor did on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// "Add" on a catalog card.
    AddCatalogProduct { id: ProductId },
    /// "Add" on a statically authored card.
    AddStaticCard(StaticCard),
    /// Stepper "-" on a cart row.
    Decrease { id: ProductId },
    /// Stepper "+" on a cart row.
    Increase { id: ProductId },
    /// Quantity field of a cart row changed; `raw` is the field's text.
    QuantityEdited { id: ProductId, raw: Option<String> },
    /// Remove button on a cart row.
    Remove { id: ProductId },
    /// Clear-all button.
    ClearCart,
    /// A form was submitted.
    FormSubmitted(Form),
}

/// A cart operation to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add(Product),
    Remove(ProductId),
    Increment(ProductId),
    Decrement(ProductId),
    SetQuantity { id: ProductId, requested: i64 },
    Clear,
}

impl Intent {
    /// Perform this intent.
    pub fn apply<S: KeyValueStore>(self, engine: &mut CartEngine<S>) -> CartOutcome {
        match self {
            Self::Add(product) => engine.add_item(&product),
            Self::Remove(id) => engine.remove_item(&id),
            Self::Increment(id) => engine.increment(&id),
            Self::Decrement(id) => engine.decrement(&id),
            Self::SetQuantity { id, requested } => engine.update_quantity(&id, requested),
            Self::Clear => engine.clear(),
        }
    }
}

/// Where an event leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    Cart(Intent),
    Form(Form),
}

/// Maps [`UiEvent`]s to [`Routed`] actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventRouter;

impl EventRouter {
    /// Route `event`. Catalog cards are resolved against `catalog`.
    ///
    /// # Errors
    ///
    /// Returns an error if a catalog card is not in `catalog` or a static card
    /// cannot be read.
    pub fn route(&self, event: UiEvent, catalog: &[Product]) -> Result<Routed, RouteError> {
        let intent = match event {
            UiEvent::AddCatalogProduct { id } => {
                let product = catalog
                    .iter()
                    .find(|product| product.id == id)
                    .ok_or(RouteError::UnknownProduct(id))?;
                Intent::Add(product.clone())
            }
            UiEvent::AddStaticCard(card) => Intent::Add(card.to_product()?),
            UiEvent::Decrease { id } => Intent::Decrement(id),
            UiEvent::Increase { id } => Intent::Increment(id),
            UiEvent::QuantityEdited { id, raw } => Intent::SetQuantity {
                id,
                requested: requested_quantity(raw.as_deref()),
            },
            UiEvent::Remove { id } => Intent::Remove(id),
            UiEvent::ClearCart => Intent::Clear,
            UiEvent::FormSubmitted(form) => return Ok(Routed::Form(form)),
        };
        Ok(Routed::Cart(intent))
    }
}
