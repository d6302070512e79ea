//! Vitrina preview: renders the storefront widget to a static page.
//!
//! Loads configuration from the environment (and `.env`), hydrates the cart
//! from the storage directory, fetches the catalog once and prints the
//! composed page to stdout. Logs go to stderr.
//!
//! Exits non-zero only if the configuration is invalid or the storage
//! directory cannot be opened; an unreachable catalog still yields a page.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitrina_storefront::StorefrontError;
use vitrina_storefront::catalog::CatalogClient;
use vitrina_storefront::config::StorefrontConfig;
use vitrina_storefront::render::HtmlSurface;
use vitrina_storefront::storage::{CartStorage, FileStore};
use vitrina_storefront::storefront::Storefront;

#[tokio::main]
async fn main() -> ExitCode {
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vitrina_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(page) => {
            println!("{page}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Preview failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<String, StorefrontError> {
    let config = StorefrontConfig::from_env()?;
    tracing::info!(
        catalog = %config.catalog_url,
        storage = %config.storage.dir.display(),
        "Configuration loaded"
    );

    let store = FileStore::open(&config.storage.dir)?.with_quota(config.storage.quota);
    let storage = CartStorage::new(store, config.storage.cart_key.clone());
    let catalog = CatalogClient::new(config.catalog_url.clone());

    let mut storefront = Storefront::new(storage, catalog, HtmlSurface::default(), &config);
    storefront.start().await;

    Ok(storefront.surface().page()?)
}
