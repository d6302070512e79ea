//! HTTP catalog client.

use std::sync::Arc;

use tracing::instrument;
use url::Url;
use vitrina_core::Product;

use super::conversions::parse_catalog;
use super::{CatalogSource, NetworkError};

/// Client for the remote catalog endpoint.
///
/// Cheaply cloneable; clones share the connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
}

impl CatalogClient {
    /// Create a client for `endpoint`. The `limit` query parameter is added per
    /// request.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Create a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner { client, endpoint }),
        }
    }

    fn request_url(&self, limit: u32) -> Url {
        let mut url = self.inner.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        url
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl CatalogSource for CatalogClient {
    #[instrument(skip(self), fields(endpoint = %self.inner.endpoint))]
    async fn fetch_catalog(&self, limit: u32) -> Result<Vec<Product>, NetworkError> {
        let response = self
            .inner
            .client
            .get(self.request_url(limit))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog returned non-success status"
            );
            return Err(NetworkError::Status {
                status,
                body: body.chars().take(200).collect(),
            });
        }

        match parse_catalog(&body) {
            Ok(products) => {
                tracing::debug!(count = products.len(), "Catalog fetched");
                Ok(products)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                Err(NetworkError::Parse(e))
            }
        }
    }
}
