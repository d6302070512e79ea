//! Core types for Vitrina.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod quantity;

pub use cart::{Added, Cart, CartLine};
pub use email::{Email, EmailError};
pub use id::ProductId;
pub use price::{Price, PriceError, format_amount};
pub use product::Product;
pub use quantity::{Quantity, requested_quantity};
