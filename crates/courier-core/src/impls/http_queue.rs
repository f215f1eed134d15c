//! HTTP implementation of the QueueClient port.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tokio::sync::watch;

use crate::domain::{PendingMessage, RunConfig, TransportError};
use crate::ports::QueueClient;

/// Per-request timeout; the transport default is no timeout at all, which
/// would wedge a cycle on a half-open connection.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// QueueClient backed by the remote store's HTTP surface.
///
/// Endpoint and credential are read from the shared `RunConfig` watch on
/// every call, so a settings change applies to the next remote call without
/// rebuilding the client.
pub struct HttpQueueClient {
    http: HttpClient,
    config: watch::Receiver<RunConfig>,
}

impl HttpQueueClient {
    pub fn new(config: watch::Receiver<RunConfig>) -> Result<Self, TransportError> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn base(&self) -> String {
        self.config.borrow().endpoint.trim_end_matches('/').to_string()
    }

    fn credential(&self) -> String {
        self.config.borrow().credential.clone()
    }

    fn with_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("Authorization", format!("Bearer {}", self.credential()))
    }
}

#[async_trait]
impl QueueClient for HttpQueueClient {
    async fn fetch_pending(&self) -> Result<Vec<PendingMessage>, TransportError> {
        let url = format!("{}?status=PENDING", self.base());
        let resp = self
            .with_auth(self.http.get(&url))
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(TransportError::Status(resp.status().as_u16()));
        }
        resp.json::<Vec<PendingMessage>>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }

    async fn update_status(&self, message: &PendingMessage) -> Result<(), TransportError> {
        let url = format!("{}/{}", self.base(), message.id);
        let resp = self
            .with_auth(self.http.put(&url).json(message))
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(TransportError::Status(resp.status().as_u16()));
        }
        // Only the HTTP status matters; no response body contract.
        Ok(())
    }
}
