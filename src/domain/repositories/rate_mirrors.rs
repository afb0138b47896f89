use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;

#[async_trait]
#[automock]
pub trait RateMirrorClient {
    /// Fetches one mirror; a non-success status is an error.
    async fn fetch_json(&self, url: String) -> Result<Value>;
}
