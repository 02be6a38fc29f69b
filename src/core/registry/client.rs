use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use super::model::{Registry, RegistryRecord};
use crate::core::error::{UpdaterError, UpdaterResult};

/// Where the remote catalog comes from.
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Fetch the whole catalog. Any failure is fatal to the run.
    async fn fetch_registry(&self) -> UpdaterResult<Registry>;
}

/// Registry served as a single JSON document over HTTP.
pub struct HttpRegistry {
    client: Client,
    url: String,
}

impl HttpRegistry {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    fn fetch_error(&self, reason: impl ToString) -> UpdaterError {
        UpdaterError::RegistryFetch {
            url: self.url.clone(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl RegistrySource for HttpRegistry {
    async fn fetch_registry(&self) -> UpdaterResult<Registry> {
        info!("Fetching mod registry from {}", self.url);

        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.fetch_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(self.fetch_error(format!("HTTP {}", status.as_u16())));
        }

        let body = resp.text().await.map_err(|e| self.fetch_error(e))?;
        let records: HashMap<String, RegistryRecord> =
            serde_json::from_str(&body).map_err(|e| self.fetch_error(e))?;

        let registry = Registry::from_records(records);
        info!("Loaded {} mods from registry", registry.len());
        Ok(registry)
    }
}
