//! In-process key-value store.

use std::collections::HashMap;

use super::{KeyValueStore, StorageError};

/// Key-value store held in memory.
///
/// Supports an optional per-value quota and can be switched off to behave like
/// storage blocked by the browser.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStore {
    /// Create an empty store without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store rejecting values longer than `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Make every operation fail with [`StorageError::Disabled`].
    pub const fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    const fn check_enabled(&self) -> Result<(), StorageError> {
        if self.disabled {
            Err(StorageError::Disabled)
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_enabled()?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        if let Some(quota) = self.quota
            && value.len() > quota
        {
            return Err(StorageError::QuotaExceeded {
                key: key.to_owned(),
                size: value.len(),
                quota,
            });
        }
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        assert!(store.get_item("k").unwrap().is_none());

        store.set_item("k", "v1").unwrap();
        store.set_item("k", "v2").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));

        store.remove_item("k").unwrap();
        store.remove_item("k").unwrap();
        assert!(store.get_item("k").unwrap().is_none());
    }

    #[test]
    fn test_quota_keeps_previous_value() {
        let mut store = MemoryStore::with_quota(4);
        store.set_item("k", "1234").unwrap();
        assert!(matches!(
            store.set_item("k", "12345"),
            Err(StorageError::QuotaExceeded { size: 5, quota: 4, .. })
        ));
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn test_disabled() {
        let mut store = MemoryStore::new();
        store.set_disabled(true);
        assert!(matches!(store.get_item("k"), Err(StorageError::Disabled)));
        assert!(matches!(store.set_item("k", "v"), Err(StorageError::Disabled)));
    }
}
