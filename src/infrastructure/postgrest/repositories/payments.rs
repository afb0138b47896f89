use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::{
    domain::{entities::payments::PaymentEntity, repositories::payments::PaymentRepository},
    infrastructure::postgrest::{filters, postgrest_client::PostgrestClient},
};

pub struct PaymentPostgrest {
    client: Arc<PostgrestClient>,
}

impl PaymentPostgrest {
    pub fn new(client: Arc<PostgrestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgrest {
    async fn approve_payment(&self, payment_id: String, approved_by: String) -> Result<Value> {
        self.client
            .call_rpc(
                "approve_payment",
                &json!({ "p_payment_id": payment_id, "p_approved_by": approved_by }),
            )
            .await
    }

    async fn find_payment_by_reference(&self, reference: String) -> Result<Option<PaymentEntity>> {
        let row = self
            .client
            .get_one(
                "payments",
                &[("reference", filters::eq(&reference))],
                "id,reference,status",
            )
            .await?;

        row.map(serde_json::from_value::<PaymentEntity>)
            .transpose()
            .context("payment row has an unexpected shape")
    }

    async fn set_payment_ci(&self, payment_id: String, ci: String) -> Result<Option<Value>> {
        self.client
            .update_one(
                "payments",
                &[("id", filters::eq(&payment_id))],
                &json!({ "ci": ci }),
            )
            .await
    }
}
