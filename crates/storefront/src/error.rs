//! Unified error type for code that drives the storefront.
//!
//! Event handling never fails (see [`crate::storefront::Storefront::dispatch`]);
//! `StorefrontError` covers setup and teardown: loading configuration, opening
//! storage, fetching the catalog outside the widget, composing the page.

use thiserror::Error;

use crate::catalog::NetworkError;
use crate::config::ConfigError;
use crate::events::RouteError;
use crate::forms::ValidationError;
use crate::render::RenderError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog fetch failed.
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Persistent storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// An event could not be routed.
    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    /// A form field failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
