use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::domain::{errors::UpstreamError, repositories::rate_mirrors::RateMirrorClient};

const MIRROR_TIMEOUT: Duration = Duration::from_secs(8);

/// Fetches exchange-rate mirrors over plain HTTPS with a fixed per-request timeout.
pub struct HttpRateMirrorClient {
    client: Client,
}

impl HttpRateMirrorClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(MIRROR_TIMEOUT)
            .build()
            .context("failed to build rate mirror http client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl RateMirrorClient for HttpRateMirrorClient {
    async fn fetch_json(&self, url: String) -> Result<Value> {
        let response = self.client.get(&url).send().await.map_err(|err| {
            let message = if err.is_timeout() {
                format!("mirror {} timed out", url)
            } else {
                format!("mirror {} request failed", url)
            };
            anyhow::Error::new(UpstreamError::Transport(message))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::Error::new(UpstreamError::Status {
                status: status.as_u16(),
                body,
            })
            .context(format!("mirror {} returned {}", url, status)));
        }

        response
            .json::<Value>()
            .await
            .with_context(|| format!("mirror {} returned invalid JSON", url))
    }
}
