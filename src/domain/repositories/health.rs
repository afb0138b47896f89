use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;

#[async_trait]
#[automock]
pub trait HealthRepository {
    async fn sample_raffles(&self) -> Result<Value>;
}
