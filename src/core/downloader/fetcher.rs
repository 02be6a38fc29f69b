use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{BoxStream, StreamExt};
use reqwest::header::CONTENT_LENGTH;
use reqwest::Client;

use crate::core::error::{UpdaterError, UpdaterResult};

/// Body of a mod file, delivered chunk by chunk.
pub type ByteStream = BoxStream<'static, UpdaterResult<Bytes>>;

/// Network side of a download.
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    /// Ask for the size of `url` without fetching it. `Ok(None)` means the
    /// server answered but did not say.
    async fn probe_length(&self, url: &str) -> UpdaterResult<Option<u64>>;

    /// Start fetching `url`. Errors in the middle of the body surface as
    /// items of the stream.
    async fn open(&self, url: &str) -> UpdaterResult<ByteStream>;
}

/// `RemoteFetcher` backed by reqwest: HEAD for the probe, streamed GET for the body.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteFetcher for HttpFetcher {
    async fn probe_length(&self, url: &str) -> UpdaterResult<Option<u64>> {
        let probe_error = |reason: String| UpdaterError::Probe {
            url: url.to_string(),
            reason,
        };

        let resp = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| probe_error(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(probe_error(format!("HTTP {}", status.as_u16())));
        }

        // Read the header directly: the body of a HEAD response is always empty.
        Ok(resp
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok()))
    }

    async fn open(&self, url: &str) -> UpdaterResult<ByteStream> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| UpdaterError::Download {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(UpdaterError::DownloadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let url = url.to_string();
        Ok(resp
            .bytes_stream()
            .map(move |chunk| {
                chunk.map_err(|e| UpdaterError::Download {
                    url: url.clone(),
                    reason: e.to_string(),
                })
            })
            .boxed())
    }
}
