//! Cart engine: the single writer of cart state.
//!
//! Every mutation runs to completion synchronously: update the in-memory
//! [`Cart`], persist it through [`CartStorage`], and report a [`CartOutcome`]
//! the storefront uses to re-render and notify. Persistence failures are logged
//! and otherwise ignored; the in-memory cart stays authoritative.

use rust_decimal::Decimal;
use vitrina_core::{Added, Cart, Product, ProductId, Quantity};

use crate::notify::Notice;
use crate::storage::{CartStorage, KeyValueStore};

/// What a cart operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// One unit of a product was added; its line now holds `quantity`.
    Added { id: ProductId, quantity: Quantity },
    /// The line for `id` was removed (`existed` is false if there was none).
    Removed { id: ProductId, existed: bool },
    /// The line for `id` now holds `quantity`.
    QuantitySet { id: ProductId, quantity: Quantity },
    /// Every line was removed.
    Cleared,
    /// Nothing happened (e.g., quantity update for an absent line).
    Unchanged,
}

/// Result of a cart operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartOutcome {
    pub change: CartChange,
    /// Message for the visitor, if the operation warrants one.
    pub notice: Option<Notice>,
    /// Whether the cart was written to storage successfully.
    pub persisted: bool,
}

impl CartOutcome {
    const fn unchanged() -> Self {
        Self {
            change: CartChange::Unchanged,
            notice: None,
            persisted: false,
        }
    }

    /// Whether the cart surfaces need re-rendering.
    #[must_use]
    pub const fn needs_render(&self) -> bool {
        !matches!(self.change, CartChange::Unchanged)
    }
}

/// Owns the authoritative cart and keeps storage in step with it.
#[derive(Debug)]
pub struct CartEngine<S> {
    cart: Cart,
    storage: CartStorage<S>,
}

impl<S: KeyValueStore> CartEngine<S> {
    /// Create an engine with the cart found in `storage` (empty if none).
    pub fn hydrate(storage: CartStorage<S>) -> Self {
        let cart = storage.load();
        tracing::info!(
            lines = cart.len(),
            items = cart.item_count(),
            "Cart hydrated"
        );
        Self { cart, storage }
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The storage adapter.
    #[must_use]
    pub const fn storage(&self) -> &CartStorage<S> {
        &self.storage
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line or appends a new one with the product's
    /// title, price and image as they are now.
    pub fn add_item(&mut self, product: &Product) -> CartOutcome {
        let quantity = match self.cart.add(product) {
            Added::NewLine => Quantity::ONE,
            Added::Incremented(quantity) => quantity,
        };
        tracing::debug!(id = %product.id, quantity = quantity.get(), "Added to cart");

        CartOutcome {
            change: CartChange::Added {
                id: product.id.clone(),
                quantity,
            },
            notice: Some(Notice::success(format!("{} added to cart", product.title))),
            persisted: self.persist(),
        }
    }

    /// Remove the line for `id`. Removing an absent line is not an error.
    pub fn remove_item(&mut self, id: &ProductId) -> CartOutcome {
        let existed = self.cart.remove(id).is_some();
        tracing::debug!(id = %id, existed, "Removed from cart");

        CartOutcome {
            change: CartChange::Removed {
                id: id.clone(),
                existed,
            },
            notice: Some(Notice::info("Product removed from cart")),
            persisted: self.persist(),
        }
    }

    /// Set the quantity of the line for `id`.
    ///
    /// A request of zero or below removes the line. No upper bound; requests
    /// beyond `u32::MAX` saturate. Does nothing if `id` has no line.
    pub fn update_quantity(&mut self, id: &ProductId, requested: i64) -> CartOutcome {
        if self.cart.line(id).is_none() {
            return CartOutcome::unchanged();
        }

        let Some(quantity) = Quantity::from_requested(requested) else {
            return self.remove_item(id);
        };

        self.cart.set_quantity(id, quantity);
        CartOutcome {
            change: CartChange::QuantitySet {
                id: id.clone(),
                quantity,
            },
            notice: None,
            persisted: self.persist(),
        }
    }

    /// Add one to the quantity of the line for `id`.
    pub fn increment(&mut self, id: &ProductId) -> CartOutcome {
        match self.current_quantity(id) {
            Some(quantity) => self.update_quantity(id, quantity + 1),
            None => CartOutcome::unchanged(),
        }
    }

    /// Subtract one from the quantity of the line for `id`, removing it at zero.
    pub fn decrement(&mut self, id: &ProductId) -> CartOutcome {
        match self.current_quantity(id) {
            Some(quantity) => self.update_quantity(id, quantity - 1),
            None => CartOutcome::unchanged(),
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> CartOutcome {
        self.cart.clear();
        CartOutcome {
            change: CartChange::Cleared,
            notice: Some(Notice::info("Cart emptied")),
            persisted: self.persist(),
        }
    }

    /// Sum of price × quantity over all lines.
    #[must_use]
    pub fn compute_total(&self) -> Decimal {
        self.cart.total()
    }

    /// Number of units in the cart, shown on the badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    fn current_quantity(&self, id: &ProductId) -> Option<i64> {
        self.cart
            .line(id)
            .map(|line| i64::from(line.quantity.get()))
    }

    fn persist(&mut self) -> bool {
        self.storage.save(&self.cart).is_ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vitrina_core::Price;

    use super::*;
    use crate::notify::ToastKind;
    use crate::storage::MemoryStore;

    fn engine() -> CartEngine<MemoryStore> {
        CartEngine::hydrate(CartStorage::new(MemoryStore::new(), "shoppingCart"))
    }

    fn product(id: u64, title: &str, cents: i64) -> Product {
        Product {
            id: ProductId::from(id),
            title: title.to_string(),
            price: Price::from_cents(cents).unwrap(),
            image: format!("{id}.png"),
            description: String::new(),
        }
    }

    fn stored(engine: &CartEngine<MemoryStore>) -> Cart {
        let json = engine
            .storage()
            .store()
            .get_item("shoppingCart")
            .unwrap()
            .unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_add_item_same_product_increments() {
        let mut engine = engine();
        let widget = product(1, "Widget", 999);

        for _ in 0..4 {
            engine.add_item(&widget);
        }

        assert_eq!(engine.cart().len(), 1);
        assert_eq!(engine.cart().line(&widget.id).unwrap().quantity.get(), 4);
        assert_eq!(stored(&engine), *engine.cart());
    }

    #[test]
    fn test_add_item_notice() {
        let mut engine = engine();
        let outcome = engine.add_item(&product(1, "Widget", 999));

        let notice = outcome.notice.unwrap();
        assert_eq!(notice.kind, ToastKind::Success);
        assert_eq!(notice.message, "Widget added to cart");
        assert!(outcome.persisted);
    }

    #[test]
    fn test_update_quantity_non_positive_removes() {
        for requested in [0, -5] {
            let mut engine = engine();
            let widget = product(1, "Widget", 999);
            engine.add_item(&widget);

            let outcome = engine.update_quantity(&widget.id, requested);
            assert!(matches!(
                outcome.change,
                CartChange::Removed { existed: true, .. }
            ));
            assert!(engine.cart().is_empty());
            assert!(stored(&engine).is_empty());
        }
    }

    #[test]
    fn test_update_quantity_absent_is_noop() {
        let mut engine = engine();
        let outcome = engine.update_quantity(&ProductId::from(9), 3);
        assert_eq!(outcome.change, CartChange::Unchanged);
        assert!(!outcome.needs_render());
        assert!(engine.storage().store().get_item("shoppingCart").unwrap().is_none());
    }

    #[test]
    fn test_update_quantity_has_no_upper_bound() {
        let mut engine = engine();
        let widget = product(1, "Widget", 100);
        engine.add_item(&widget);

        engine.update_quantity(&widget.id, 10_000);
        assert_eq!(engine.item_count(), 10_000);
        assert_eq!(engine.compute_total(), Decimal::new(10_000, 0));
    }

    #[test]
    fn test_remove_absent_still_persists() {
        let mut engine = engine();
        let outcome = engine.remove_item(&ProductId::from(3));
        assert_eq!(
            outcome.change,
            CartChange::Removed {
                id: ProductId::from(3),
                existed: false
            }
        );
        assert!(outcome.persisted);
        assert_eq!(outcome.notice.unwrap().kind, ToastKind::Info);
    }

    #[test]
    fn test_stepper() {
        let mut engine = engine();
        let widget = product(1, "Widget", 100);
        engine.add_item(&widget);

        engine.increment(&widget.id);
        engine.increment(&widget.id);
        assert_eq!(engine.item_count(), 3);

        engine.decrement(&widget.id);
        engine.decrement(&widget.id);
        assert_eq!(engine.item_count(), 1);

        let outcome = engine.decrement(&widget.id);
        assert!(matches!(outcome.change, CartChange::Removed { .. }));
        assert!(engine.cart().is_empty());

        assert_eq!(engine.increment(&widget.id).change, CartChange::Unchanged);
    }

    #[test]
    fn test_total_example() {
        let mut engine = engine();
        let a = product(1, "A", 1000);
        let b = product(2, "B", 550);
        engine.add_item(&a);
        engine.update_quantity(&a.id, 2);
        engine.add_item(&b);
        engine.update_quantity(&b.id, 3);

        assert_eq!(engine.compute_total(), Decimal::new(3650, 2));
        assert_eq!(engine.item_count(), 5);
    }

    #[test]
    fn test_clear() {
        let mut engine = engine();
        engine.add_item(&product(1, "A", 100));
        engine.add_item(&product(2, "B", 100));

        let outcome = engine.clear();
        assert_eq!(outcome.change, CartChange::Cleared);
        assert!(engine.cart().is_empty());
        assert_eq!(engine.compute_total(), Decimal::ZERO);
        assert!(stored(&engine).is_empty());
    }

    #[test]
    fn test_hydrates_from_storage() {
        let mut first = engine();
        first.add_item(&product(1, "A", 100));
        first.add_item(&product(1, "A", 100));
        let json = first
            .storage()
            .store()
            .get_item("shoppingCart")
            .unwrap()
            .unwrap();

        let mut store = MemoryStore::new();
        store.set_item("shoppingCart", &json).unwrap();
        let second = CartEngine::hydrate(CartStorage::new(store, "shoppingCart"));
        assert_eq!(second.cart(), first.cart());
    }

    #[test]
    fn test_write_failure_keeps_memory_authoritative() {
        let mut engine = CartEngine::hydrate(CartStorage::new(
            MemoryStore::with_quota(8),
            "shoppingCart",
        ));
        let widget = product(1, "Widget", 999);

        let outcome = engine.add_item(&widget);
        assert!(!outcome.persisted);
        assert_eq!(engine.item_count(), 1);

        engine.add_item(&widget);
        assert_eq!(engine.item_count(), 2);
    }
}
