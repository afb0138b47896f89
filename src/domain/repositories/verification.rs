use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;

use crate::domain::{
    entities::{payment_tickets::PaymentTicketEntity, payments::PaymentSummaryEntity},
    value_objects::{
        enums::payment_statuses::PaymentStatus, verification::PaymentTicketFilter,
    },
};

#[async_trait]
#[automock]
pub trait VerificationRepository {
    async fn verify_tickets_rpc(&self, query: String, include_pending: bool) -> Result<Value>;
    async fn find_payment_tickets(
        &self,
        filter: PaymentTicketFilter,
    ) -> Result<Vec<PaymentTicketEntity>>;
    async fn find_payments(
        &self,
        term: String,
        statuses: Vec<PaymentStatus>,
    ) -> Result<Vec<PaymentSummaryEntity>>;
}
