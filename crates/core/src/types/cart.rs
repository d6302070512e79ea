//! The shopping cart and its lines.
//!
//! [`Cart`] only enforces the in-memory invariants: one line per identifier and
//! a quantity of at least one on every line. Persistence and notifications are
//! layered on top by the storefront's cart engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::product::Product;
use super::quantity::Quantity;

/// One distinct product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub title: String,
    /// Unit price captured when the product was first added.
    pub price: Price,
    pub image: String,
    pub quantity: Quantity,
}

impl CartLine {
    /// Price of the whole line.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price.times(self.quantity.get())
    }
}

/// Result of adding a product to a [`Cart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Added {
    /// A new line was appended.
    NewLine,
    /// An existing line now holds this quantity.
    Incremented(Quantity),
}

/// An ordered list of cart lines, unique by identifier.
///
/// Serializes as a JSON array of lines. Deserialization merges lines that share
/// an identifier, summing their quantities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from lines, merging duplicates.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            match cart.line_mut(&line.id) {
                Some(existing) => {
                    let merged = existing.quantity.get().saturating_add(line.quantity.get());
                    existing.quantity = Quantity::new(merged).unwrap_or(existing.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Find the line for `id`.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Add one unit of `product`, snapshotting its title, price and image on
    /// first add.
    pub fn add(&mut self, product: &Product) -> Added {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.incremented();
            return Added::Incremented(line.quantity);
        }

        self.lines.push(CartLine {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: Quantity::ONE,
        });
        Added::NewLine
    }

    /// Remove the line for `id`, returning it if it existed.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| &line.id == id)?;
        Some(self.lines.remove(index))
    }

    /// Set the quantity of an existing line. Returns `false` if `id` is absent.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: Quantity) -> bool {
        self.line_mut(id).is_some_and(|line| {
            line.quantity = quantity;
            true
        })
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of price × quantity over all lines, saturating at
    /// [`Decimal::MAX`]. Zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::subtotal)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let lines = Vec::<CartLine>::deserialize(deserializer)?;
        Ok(Self::from_lines(lines))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: u64, title: &str, cents: i64) -> Product {
        Product {
            id: ProductId::from(id),
            title: title.to_string(),
            price: Price::from_cents(cents).unwrap(),
            image: format!("https://img.example/{id}.png"),
            description: String::new(),
        }
    }

    #[test]
    fn test_repeated_add_increments_single_line() {
        let mut cart = Cart::new();
        let widget = product(1, "Widget", 999);

        assert_eq!(cart.add(&widget), Added::NewLine);
        for expected in 2..=5 {
            assert_eq!(
                cart.add(&widget),
                Added::Incremented(Quantity::new(expected).unwrap())
            );
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(&widget.id).unwrap().quantity.get(), 5);
    }

    #[test]
    fn test_price_snapshotted_at_first_add() {
        let mut cart = Cart::new();
        let mut widget = product(1, "Widget", 999);
        cart.add(&widget);

        widget.price = Price::from_cents(1999).unwrap();
        cart.add(&widget);

        let line = cart.line(&widget.id).unwrap();
        assert_eq!(line.price, Price::from_cents(999).unwrap());
        assert_eq!(line.quantity.get(), 2);
    }

    #[test]
    fn test_total_and_item_count() {
        let mut cart = Cart::new();
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.item_count(), 0);

        let a = product(1, "A", 1000);
        let b = product(2, "B", 550);
        cart.add(&a);
        cart.add(&a);
        cart.add(&b);
        cart.set_quantity(&b.id, Quantity::new(3).unwrap());

        assert_eq!(cart.total(), Decimal::new(3650, 2));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_total_saturates_on_huge_prices() {
        let mut cart = Cart::new();
        let mut huge = product(1, "Yacht", 0);
        huge.price = Price::parse_loose("$50000000000000000000000000000").unwrap();

        cart.add(&huge);
        cart.add(&huge);
        assert_eq!(cart.line(&huge.id).unwrap().subtotal(), Decimal::MAX);
        assert_eq!(cart.total(), Decimal::MAX);

        cart.add(&product(2, "Mate", 1250));
        assert_eq!(cart.total(), Decimal::MAX);
    }

    #[test]
    fn test_remove_and_set_quantity_on_absent_id() {
        let mut cart = Cart::new();
        cart.add(&product(1, "A", 100));

        assert!(cart.remove(&ProductId::from(9)).is_none());
        assert!(!cart.set_quantity(&ProductId::from(9), Quantity::ONE));
        assert_eq!(cart.len(), 1);

        assert!(cart.remove(&ProductId::from(1)).is_some());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(&product(3, "C", 100));
        cart.add(&product(1, "A", 100));
        cart.add(&product(3, "C", 100));

        let ids: Vec<_> = cart.lines().iter().map(|line| line.id.clone()).collect();
        assert_eq!(ids, vec![ProductId::from(3), ProductId::from(1)]);
    }

    #[test]
    fn test_json_shape() {
        let mut cart = Cart::new();
        cart.add(&product(1, "Widget", 999));

        let value = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "id": 1,
                "title": "Widget",
                "price": 9.99,
                "image": "https://img.example/1.png",
                "quantity": 1
            }])
        );
    }

    #[test]
    fn test_deserialize_merges_duplicate_ids() {
        let json = r#"[
            {"id": "static-Gadget", "title": "Gadget", "price": 5, "image": "g.png", "quantity": 1},
            {"id": 2, "title": "Mate", "price": 12.5, "image": "m.png", "quantity": 2},
            {"id": "static-Gadget", "title": "Gadget", "price": 5, "image": "g.png", "quantity": 3}
        ]"#;

        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(
            cart.line(&ProductId::for_static_title("Gadget"))
                .unwrap()
                .quantity
                .get(),
            4
        );
    }

    #[test]
    fn test_deserialize_rejects_zero_quantity() {
        let json = r#"[{"id": 1, "title": "A", "price": 1, "image": "", "quantity": 0}]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }
}
