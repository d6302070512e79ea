//! Product identifiers.
//!
//! Catalog products carry the numeric identifier assigned by the catalog API.
//! Products authored directly in page markup have no such identifier, so one is
//! derived from their title. Both forms share the [`ProductId`] type so the
//! cart can treat every line the same way.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Prefix of identifiers derived for products without a catalog identifier.
pub const STATIC_PREFIX: &str = "static-";

/// Identifier of a product and of the cart line holding it.
///
/// Serialized untagged: catalog identifiers as JSON numbers, derived
/// identifiers as JSON strings.
///
/// # Example
///
/// ```rust
/// # use vitrina_core::ProductId;
/// let catalog = ProductId::from(3);
/// let authored = ProductId::for_static_title("  Gadget ");
///
/// assert_eq!(catalog.to_string(), "3");
/// assert_eq!(authored.to_string(), "static-Gadget");
/// assert_eq!(authored, ProductId::for_static_title("Gadget"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Identifier assigned by the catalog API.
    Catalog(u64),
    /// Text identifier, either derived from a title or read back from storage.
    Text(String),
}

impl ProductId {
    /// Derive the stable identifier of a product that has no catalog identifier.
    ///
    /// Two cards with the same (trimmed) title always map to the same identifier,
    /// so clicking either of them lands on a single cart line.
    #[must_use]
    pub fn for_static_title(title: &str) -> Self {
        Self::Text(format!("{STATIC_PREFIX}{}", title.trim()))
    }

    /// Parse the identifier carried by a rendered element (`data-id`).
    ///
    /// Purely numeric values are catalog identifiers; anything else is text.
    #[must_use]
    pub fn parse_attr(value: &str) -> Self {
        value
            .parse::<u64>()
            .map_or_else(|_| Self::Text(value.to_owned()), Self::Catalog)
    }

    /// Whether this identifier was derived from static markup.
    #[must_use]
    pub fn is_static(&self) -> bool {
        matches!(self, Self::Text(text) if text.starts_with(STATIC_PREFIX))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(id) => write!(f, "{id}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self::Catalog(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_static_id_ignores_surrounding_whitespace() {
        assert_eq!(
            ProductId::for_static_title("Gadget"),
            ProductId::for_static_title("\n  Gadget  ")
        );
        assert!(ProductId::for_static_title("Gadget").is_static());
        assert!(!ProductId::from(1).is_static());
    }

    #[test]
    fn test_parse_attr() {
        assert_eq!(ProductId::parse_attr("42"), ProductId::Catalog(42));
        assert_eq!(
            ProductId::parse_attr("static-Mate"),
            ProductId::Text("static-Mate".to_string())
        );
        assert_eq!(ProductId::parse_attr("-1"), ProductId::Text("-1".to_string()));
    }

    #[test]
    fn test_parse_attr_matches_display() {
        for id in [ProductId::from(7), ProductId::for_static_title("Mate")] {
            assert_eq!(ProductId::parse_attr(&id.to_string()), id);
        }
    }

    #[test]
    fn test_serde_untagged() {
        assert_eq!(serde_json::to_string(&ProductId::from(5)).unwrap(), "5");
        assert_eq!(
            serde_json::to_string(&ProductId::for_static_title("Mate")).unwrap(),
            "\"static-Mate\""
        );

        let parsed: ProductId = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, ProductId::Catalog(12));
        let parsed: ProductId = serde_json::from_str("\"static-Mate\"").unwrap();
        assert!(parsed.is_static());
    }
}
