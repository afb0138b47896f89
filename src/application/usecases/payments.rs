use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::{
    application::usecases::errors::{UseCaseError, UseCaseResult},
    domain::{
        repositories::payments::PaymentRepository,
        value_objects::payments::{ApprovePaymentModel, SetPaymentCiModel},
    },
};

pub struct PaymentUseCase<P>
where
    P: PaymentRepository + Send + Sync + 'static,
{
    payment_repository: Arc<P>,
}

impl<P> PaymentUseCase<P>
where
    P: PaymentRepository + Send + Sync + 'static,
{
    pub fn new(payment_repository: Arc<P>) -> Self {
        Self { payment_repository }
    }

    pub async fn approve(&self, model: ApprovePaymentModel) -> UseCaseResult<Value> {
        let payment_id = required("payment_id", &model.payment_id)?;
        let approved_by = required("approved_by", &model.approved_by)?;

        info!(%payment_id, %approved_by, "payments: approving payment");

        let result = self
            .payment_repository
            .approve_payment(payment_id, approved_by)
            .await?;
        Ok(result)
    }

    /// Stores the buyer's CI on a payment. Returns the updated row, `None`
    /// when no payment has that id.
    pub async fn set_ci(&self, model: SetPaymentCiModel) -> UseCaseResult<Option<Value>> {
        let payment_id = required("payment_id", &model.payment_id)?;
        let ci = required("ci", &model.ci)?;

        let updated = self
            .payment_repository
            .set_payment_ci(payment_id.clone(), ci)
            .await?;

        if updated.is_none() {
            warn!(%payment_id, "payments: set-ci matched no payment");
        }
        Ok(updated)
    }
}

fn required(field: &str, value: &str) -> UseCaseResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(UseCaseError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}
