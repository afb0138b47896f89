use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    application::usecases::errors::{UseCaseError, UseCaseResult},
    domain::{
        entities::payment_tickets::PaymentTicketEntity,
        repositories::verification::VerificationRepository,
        value_objects::{
            enums::payment_statuses::PaymentStatus,
            verification::{
                MIN_DIGITS_FOR_RETRY, MIN_QUERY_CHARS, PaymentTicketFilter, VerificationRow,
                VerifiedTickets, VerifyQuery, digits_only,
            },
        },
    },
};

pub struct VerificationUseCase<R>
where
    R: VerificationRepository + Send + Sync + 'static,
{
    verification_repository: Arc<R>,
}

impl<R> VerificationUseCase<R>
where
    R: VerificationRepository + Send + Sync + 'static,
{
    pub fn new(verification_repository: Arc<R>) -> Self {
        Self {
            verification_repository,
        }
    }

    /// Looks tickets up by email or CI, trying each source in turn until one
    /// yields rows: the `verify_tickets` RPC, the embedded join (email or CI,
    /// then email only) and finally payments first, tickets second.
    pub async fn verify(&self, query: VerifyQuery) -> UseCaseResult<VerifiedTickets> {
        let (term, include_pending) = parse_query(&query)?;
        let statuses = PaymentStatus::verification_set(include_pending).to_vec();

        match self
            .verification_repository
            .verify_tickets_rpc(term.clone(), include_pending)
            .await
        {
            Ok(Value::Array(rows)) => {
                info!(rows = rows.len(), "verification: answered by rpc");
                return Ok(VerifiedTickets::Rpc(rows));
            }
            Ok(other) => {
                debug!(kind = value_kind(&other), "verification: rpc result unusable");
            }
            Err(err) => {
                warn!(error = %err, "verification: rpc unavailable, using table lookup");
            }
        }

        let rows = self.joined_lookup(&term, &statuses).await;
        if !rows.is_empty() {
            info!(rows = rows.len(), "verification: answered by joined lookup");
            return Ok(project(rows));
        }

        let rows = self.payments_first_lookup(&term, &statuses).await?;
        info!(rows = rows.len(), "verification: answered by payments lookup");
        Ok(project(rows))
    }

    async fn joined_lookup(
        &self,
        term: &str,
        statuses: &[PaymentStatus],
    ) -> Vec<PaymentTicketEntity> {
        let email_or_ci = PaymentTicketFilter::EmailOrCi {
            term: term.to_string(),
            statuses: statuses.to_vec(),
        };

        match self
            .verification_repository
            .find_payment_tickets(email_or_ci)
            .await
        {
            Ok(rows) => return rows,
            Err(err) => {
                warn!(error = %err, "verification: email/ci join failed, retrying with email only");
            }
        }

        let email_only = PaymentTicketFilter::EmailOnly {
            term: term.to_string(),
            statuses: statuses.to_vec(),
        };

        self.verification_repository
            .find_payment_tickets(email_only)
            .await
            .unwrap_or_else(|err| {
                warn!(error = %err, "verification: email join failed");
                Vec::new()
            })
    }

    async fn payments_first_lookup(
        &self,
        term: &str,
        statuses: &[PaymentStatus],
    ) -> UseCaseResult<Vec<PaymentTicketEntity>> {
        let mut payments = self
            .verification_repository
            .find_payments(term.to_string(), statuses.to_vec())
            .await?;

        if payments.is_empty() {
            let digits = digits_only(term);
            if digits.len() >= MIN_DIGITS_FOR_RETRY && digits != term {
                debug!(digits = %digits, "verification: retrying payments with digits only");
                payments = self
                    .verification_repository
                    .find_payments(digits, statuses.to_vec())
                    .await?;
            }
        }

        let payment_ids = payments
            .into_iter()
            .map(|payment| payment.id)
            .filter(|id| !id.is_empty())
            .collect::<Vec<_>>();

        if payment_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .verification_repository
            .find_payment_tickets(PaymentTicketFilter::PaymentIds(payment_ids))
            .await?)
    }
}

fn parse_query(query: &VerifyQuery) -> UseCaseResult<(String, bool)> {
    let term = query.q.as_deref().map(str::trim).unwrap_or_default();
    if term.chars().count() < MIN_QUERY_CHARS {
        return Err(UseCaseError::Validation(format!(
            "q must be at least {} characters",
            MIN_QUERY_CHARS
        )));
    }

    let include_pending = match query.include_pending.as_deref() {
        None => true,
        Some(raw) => parse_flag(raw).ok_or_else(|| {
            UseCaseError::Validation("include_pending must be a boolean".to_string())
        })?,
    };

    Ok((term.to_string(), include_pending))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn project(rows: Vec<PaymentTicketEntity>) -> VerifiedTickets {
    VerifiedTickets::Projected(
        rows.iter()
            .map(PaymentTicketEntity::to_verification_row)
            .collect::<Vec<VerificationRow>>(),
    )
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
