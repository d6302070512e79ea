//! Vitrina Core - Catalog and cart data model.
//!
//! This crate provides the types shared by the storefront widget:
//! products as served by the catalog API or authored in page markup, and the
//! cart those products are collected into.
//!
//! # Architecture
//!
//! The core crate contains only types and their pure invariants - no I/O, no
//! storage access, no HTTP clients. Persistence and rendering live in
//! `vitrina-storefront`.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, prices, quantities, emails, and the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
