//! Upstream news client
//!
//! One GET per descriptor; the outcome is either the JSON payload or an
//! `UpstreamError` carrying the provider's diagnostics.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::UpstreamError;

const USER_AGENT: &str = concat!("news_proxy/", env!("CARGO_PKG_VERSION"));

/// Source of news payloads, swappable for tests.
#[async_trait]
pub trait NewsUpstream: Send + Sync {
    /// Fetches the payload at `url`. Called exactly once per inbound request.
    async fn fetch(&self, url: &str) -> Result<Value, UpstreamError>;
}

/// Error body returned by NewsAPI.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// reqwest-backed client for NewsAPI.
#[derive(Debug, Clone)]
pub struct HttpNewsUpstream {
    client: Client,
}

impl Default for HttpNewsUpstream {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpNewsUpstream {
    /// Client with reqwest's default settings (no request timeout).
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Client that gives up on the upstream after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NewsUpstream for HttpNewsUpstream {
    async fn fetch(&self, url: &str) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(e.without_url().to_string()))?;

        if !status.is_success() {
            let body: Option<ProviderErrorBody> = serde_json::from_slice(&bytes).ok();
            let (code, message) = match body {
                Some(body) => (body.code, body.message),
                None => (None, None),
            };
            let message = message.unwrap_or_else(|| {
                format!("Request failed with status code {}", status.as_u16())
            });
            return Err(UpstreamError::status(status.as_u16(), code, message));
        }

        serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Malformed(e.to_string()))
    }
}
