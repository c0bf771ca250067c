//! Object-store source: fetches a named document over HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::IngestError;
use crate::ingest::DocumentSource;

/// Client for the clinic's document bucket.
pub struct ObjectStoreClient {
    client: reqwest::Client,
    config: StoreConfig,
}

impl ObjectStoreClient {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// A `DocumentSource` addressing one stored document by key.
    pub fn document(self: &Arc<Self>, key: impl Into<String>) -> StoredDocument {
        StoredDocument {
            store: Arc::clone(self),
            key: key.into(),
        }
    }

    async fn fetch(&self, key: &str) -> Result<String, IngestError> {
        let url = format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.bucket,
            key
        );
        debug!(%url, "Fetching stored document");

        let mut request = self.client.get(&url).timeout(self.config.timeout);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| IngestError::Fetch {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(IngestError::NotFound {
                bucket: self.config.bucket.clone(),
                key: key.to_string(),
            }),
            status if !status.is_success() => Err(IngestError::Fetch {
                key: key.to_string(),
                reason: format!("store returned status {status}"),
            }),
            _ => response.text().await.map_err(|e| IngestError::Fetch {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// One stored document, addressed by key.
pub struct StoredDocument {
    store: Arc<ObjectStoreClient>,
    key: String,
}

#[async_trait]
impl DocumentSource for StoredDocument {
    fn name(&self) -> &str {
        "object-store"
    }

    async fn fetch_text(&self) -> Result<String, IngestError> {
        self.store.fetch(&self.key).await
    }
}
