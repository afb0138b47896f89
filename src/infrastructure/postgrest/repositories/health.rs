use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::{
    domain::repositories::health::HealthRepository,
    infrastructure::postgrest::postgrest_client::PostgrestClient,
};

pub struct HealthPostgrest {
    client: Arc<PostgrestClient>,
}

impl HealthPostgrest {
    pub fn new(client: Arc<PostgrestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HealthRepository for HealthPostgrest {
    async fn sample_raffles(&self) -> Result<Value> {
        let rows = self
            .client
            .get_many("raffles", &[("limit", "1".to_string())], "id")
            .await?;
        Ok(Value::Array(rows))
    }
}
