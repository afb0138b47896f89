use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    application::usecases::errors::{UseCaseError, UseCaseResult},
    domain::{
        repositories::payments::PaymentRepository,
        value_objects::webhooks::{PaymentWebhookModel, WebhookReceiptModel},
    },
};

const WEBHOOK_APPROVER: &str = "webhook";

pub struct PaymentWebhookUseCase<P>
where
    P: PaymentRepository + Send + Sync + 'static,
{
    payment_repository: Arc<P>,
}

impl<P> PaymentWebhookUseCase<P>
where
    P: PaymentRepository + Send + Sync + 'static,
{
    pub fn new(payment_repository: Arc<P>) -> Self {
        Self { payment_repository }
    }

    // TODO: verify the gateway signature once the provider is chosen.
    pub async fn handle(&self, payload: PaymentWebhookModel) -> UseCaseResult<WebhookReceiptModel> {
        let reference = payload
            .reference
            .as_deref()
            .map(str::trim)
            .filter(|reference| !reference.is_empty())
            .ok_or_else(|| UseCaseError::Validation("reference is required".to_string()))?
            .to_string();

        let payment = self
            .payment_repository
            .find_payment_by_reference(reference.clone())
            .await?
            .ok_or_else(|| {
                warn!(%reference, "payment_webhook: unknown payment reference");
                UseCaseError::NotFound("payment not found".to_string())
            })?;

        let approved = payload.is_approved();
        info!(
            %reference,
            payment_id = %payment.id,
            provider_status = payload.status.as_deref().unwrap_or_default(),
            approved,
            "payment_webhook: notification received"
        );

        if approved {
            self.payment_repository
                .approve_payment(payment.id.clone(), WEBHOOK_APPROVER.to_string())
                .await?;
        }

        Ok(WebhookReceiptModel {
            received: true,
            processed: approved,
        })
    }
}
