use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::debug;

use crate::config::{RetrieverConfig, STATUS_PORT, VIDEO_STATUS_ENDPOINT};
use crate::error::{PollError, TransferError};
use crate::node::snapshot::StatusSnapshot;
use crate::node::traits::VideoNode;

/// HTTP client for one node's extras API.
pub struct HttpVideoNode {
    client: Client,
    status_url: String,
    status_timeout: Duration,
    download_timeout: Duration,
}

impl HttpVideoNode {
    pub fn new(host: &str, config: &RetrieverConfig) -> Self {
        let status_url = format!("http://{}:{}{}", host, STATUS_PORT, VIDEO_STATUS_ENDPOINT);
        Self::from_status_url(status_url, config)
    }

    /// Point the client at a full status URL instead of the standard host
    /// and port, for nodes reachable only through a proxy.
    pub fn from_status_url(status_url: String, config: &RetrieverConfig) -> Self {
        Self {
            client: Client::new(),
            status_url,
            status_timeout: config.http_timeout(),
            download_timeout: config.download_timeout(),
        }
    }

    pub fn status_url(&self) -> &str {
        &self.status_url
    }
}

#[async_trait]
impl VideoNode for HttpVideoNode {
    async fn fetch_status(&self) -> Result<StatusSnapshot, PollError> {
        let resp = self
            .client
            .get(&self.status_url)
            .timeout(self.status_timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| PollError::Transport {
                url: self.status_url.clone(),
                source: e,
            })?;

        let body = resp.bytes().await.map_err(|e| PollError::Transport {
            url: self.status_url.clone(),
            source: e,
        })?;

        let snapshot = serde_json::from_slice(&body).map_err(|e| PollError::Parse {
            url: self.status_url.clone(),
            source: e,
        })?;
        debug!("status poll ok url={}", self.status_url);
        Ok(snapshot)
    }

    async fn fetch_video(&self, url: &str) -> Result<Bytes, TransferError> {
        let resp = self
            .client
            .get(url)
            .timeout(self.download_timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| TransferError::Fetch {
                url: url.to_string(),
                source: e,
            })?;

        let bytes = resp.bytes().await.map_err(|e| TransferError::Fetch {
            url: url.to_string(),
            source: e,
        })?;
        debug!("video download ok url={} bytes={}", url, bytes.len());
        Ok(bytes)
    }
}
