//! Vitrina storefront widget.
//!
//! Shows a product catalog fetched from a remote endpoint, keeps a shopping
//! cart persisted in key-value storage, and confirms every action with a
//! short-lived toast. The preview binary renders the widget to a static page.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod forms;
pub mod notify;
pub mod render;
pub mod storage;
pub mod storefront;

pub use error::{Result, StorefrontError};
pub use storefront::{Dispatched, Storefront};
