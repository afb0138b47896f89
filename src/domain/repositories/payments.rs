use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;

use crate::domain::entities::payments::PaymentEntity;

#[async_trait]
#[automock]
pub trait PaymentRepository {
    async fn approve_payment(&self, payment_id: String, approved_by: String) -> Result<Value>;
    async fn find_payment_by_reference(&self, reference: String) -> Result<Option<PaymentEntity>>;
    async fn set_payment_ci(&self, payment_id: String, ci: String) -> Result<Option<Value>>;
}
