//! Persistent key-value storage for the cart.
//!
//! # Architecture
//!
//! - [`KeyValueStore`] mirrors origin-scoped browser storage: string keys,
//!   string values, synchronous access
//! - [`MemoryStore`] keeps values in process (tests, ephemeral sessions)
//! - [`FileStore`] keeps one file per key in a directory
//! - [`CartStorage`] binds a store to the fixed cart key and owns the
//!   serialization format
//!
//! Storage failures never reach the visitor. A cart that cannot be read
//! hydrates empty; a cart that cannot be written stays authoritative in memory.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;
use vitrina_core::Cart;

/// Errors that can occur when reading or writing persistent storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored or outgoing JSON was malformed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Value exceeds the store's quota.
    #[error("Quota exceeded writing {key}: {size} bytes exceeds {quota}")]
    QuotaExceeded {
        key: String,
        size: usize,
        quota: usize,
    },

    /// Storage is unavailable (e.g., blocked by privacy settings).
    #[error("Storage is disabled")]
    Disabled,
}

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written or the value is over quota.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// The cart's view of a [`KeyValueStore`]: one fixed key, JSON values.
#[derive(Debug)]
pub struct CartStorage<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartStorage<S> {
    /// Bind `store` to `key`.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The key the cart is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Serialize and write `cart`.
    ///
    /// Failures are logged before being returned; callers may ignore them and
    /// keep the in-memory cart as the source of truth.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&mut self, cart: &Cart) -> Result<(), StorageError> {
        let result = serde_json::to_string(cart)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set_item(&self.key, &json));

        if let Err(e) = &result {
            tracing::error!(key = %self.key, error = %e, "Failed to persist cart");
        }
        result
    }

    /// Read the stored cart.
    ///
    /// Returns an empty cart if the key is absent, the store cannot be read, or
    /// the stored value is not a valid cart. Errors are logged, never returned.
    pub fn load(&self) -> Cart {
        let json = match self.store.get_item(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => return Cart::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read stored cart");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Cart>(&json) {
            Ok(cart) => {
                tracing::debug!(key = %self.key, lines = cart.len(), "Hydrated cart");
                cart
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    stored = %json.chars().take(200).collect::<String>(),
                    "Discarding malformed stored cart"
                );
                Cart::new()
            }
        }
    }

    /// Remove the stored cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove_item(&self.key)
    }
}
