//! Storefront configuration.
//!
//! Every setting has a default matching the widget's production behaviour, so
//! the library can be used with [`StorefrontConfig::default`]. The preview
//! binary overrides defaults from the environment.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `VITRINA_CATALOG_URL` - Catalog endpoint (default: <https://fakestoreapi.com/products>)
//! - `VITRINA_CATALOG_LIMIT` - Number of products requested (default: 8)
//! - `VITRINA_STORAGE_DIR` - Directory backing persistent storage (default: .vitrina)
//! - `VITRINA_STORAGE_KEY` - Key the cart is stored under (default: shoppingCart)
//! - `VITRINA_STORAGE_QUOTA` - Storage quota in bytes (default: 5242880)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";
pub const DEFAULT_CATALOG_LIMIT: u32 = 8;
pub const DEFAULT_STORAGE_KEY: &str = "shoppingCart";
/// Browsers give each origin roughly 5 MiB of local storage.
pub const DEFAULT_STORAGE_QUOTA: usize = 5 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog endpoint, without the limit parameter
    pub catalog_url: Url,
    /// Number of products requested from the catalog
    pub catalog_limit: u32,
    /// Persistent storage configuration
    pub storage: StorageConfig,
    /// Toast timing
    pub notifications: NotificationTiming,
}

/// Persistent storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding one file per key
    pub dir: PathBuf,
    /// Key the cart is stored under
    pub cart_key: String,
    /// Maximum bytes per stored value
    pub quota: usize,
}

/// Timing of a toast's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    /// Delay before the toast becomes visible (lets the enter transition run)
    pub show_delay: Duration,
    /// How long the toast stays visible
    pub display: Duration,
    /// Delay between hiding and removal (lets the exit transition run)
    pub removal_delay: Duration,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            show_delay: Duration::from_millis(10),
            display: Duration::from_secs(3),
            removal_delay: Duration::from_millis(300),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".vitrina"),
            cart_key: DEFAULT_STORAGE_KEY.to_string(),
            quota: DEFAULT_STORAGE_QUOTA,
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_url: default_catalog_url(),
            catalog_limit: DEFAULT_CATALOG_LIMIT,
            storage: StorageConfig::default(),
            notifications: NotificationTiming::default(),
        }
    }
}

#[allow(clippy::expect_used)]
fn default_catalog_url() -> Url {
    Url::parse(DEFAULT_CATALOG_URL).expect("default catalog URL is valid")
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let catalog_url = match lookup("VITRINA_CATALOG_URL") {
            Some(value) => Url::parse(&value).map_err(|e| {
                ConfigError::InvalidEnvVar("VITRINA_CATALOG_URL".to_string(), e.to_string())
            })?,
            None => defaults.catalog_url,
        };
        let catalog_limit = parse_or_default(
            &lookup,
            "VITRINA_CATALOG_LIMIT",
            defaults.catalog_limit,
        )?;

        let storage = StorageConfig {
            dir: lookup("VITRINA_STORAGE_DIR").map_or(defaults.storage.dir, PathBuf::from),
            cart_key: lookup("VITRINA_STORAGE_KEY").unwrap_or(defaults.storage.cart_key),
            quota: parse_or_default(&lookup, "VITRINA_STORAGE_QUOTA", defaults.storage.quota)?,
        };

        Ok(Self {
            catalog_url,
            catalog_limit,
            storage,
            notifications: defaults.notifications,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if set, otherwise use the default.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
