use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::{
    domain::{
        entities::{payment_tickets::PaymentTicketEntity, payments::PaymentSummaryEntity},
        repositories::verification::VerificationRepository,
        value_objects::{
            enums::payment_statuses::PaymentStatus, verification::PaymentTicketFilter,
        },
    },
    infrastructure::postgrest::{filters, postgrest_client::PostgrestClient},
};

const PAYMENT_TICKET_SELECT: &str = "payments!inner(id,email,ci,status,created_at),\
tickets(id,ticket_number,status,raffle_id,raffles(name))";

const PAYMENT_SELECT: &str = "id,email,ci,status,created_at";

pub struct VerificationPostgrest {
    client: Arc<PostgrestClient>,
}

impl VerificationPostgrest {
    pub fn new(client: Arc<PostgrestClient>) -> Self {
        Self { client }
    }
}

fn status_list(statuses: &[PaymentStatus]) -> String {
    let names = statuses.iter().map(PaymentStatus::as_str).collect::<Vec<_>>();
    filters::in_list(&names)
}

fn payment_ticket_filters(filter: &PaymentTicketFilter) -> Vec<(&'static str, String)> {
    match filter {
        PaymentTicketFilter::EmailOrCi { term, statuses } => vec![
            (
                "or",
                filters::or_group(&[
                    filters::ilike_condition("payments.email", term),
                    filters::ilike_condition("payments.ci", term),
                ]),
            ),
            ("payments.status", status_list(statuses)),
        ],
        PaymentTicketFilter::EmailOnly { term, statuses } => vec![
            ("payments.email", filters::ilike_contains(term)),
            ("payments.status", status_list(statuses)),
        ],
        PaymentTicketFilter::PaymentIds(ids) => vec![("payment_id", filters::in_list(ids))],
    }
}

#[async_trait]
impl VerificationRepository for VerificationPostgrest {
    async fn verify_tickets_rpc(&self, query: String, include_pending: bool) -> Result<Value> {
        self.client
            .call_rpc(
                "verify_tickets",
                &json!({ "p_query": query, "p_include_pending": include_pending }),
            )
            .await
    }

    async fn find_payment_tickets(
        &self,
        filter: PaymentTicketFilter,
    ) -> Result<Vec<PaymentTicketEntity>> {
        let params = payment_ticket_filters(&filter);
        let rows = self
            .client
            .get_many("payment_tickets", &params, PAYMENT_TICKET_SELECT)
            .await?;

        rows.into_iter()
            .map(serde_json::from_value::<PaymentTicketEntity>)
            .collect::<Result<Vec<_>, _>>()
            .context("payment_tickets row has an unexpected shape")
    }

    async fn find_payments(
        &self,
        term: String,
        statuses: Vec<PaymentStatus>,
    ) -> Result<Vec<PaymentSummaryEntity>> {
        let params = [
            (
                "or",
                filters::or_group(&[
                    filters::ilike_condition("email", &term),
                    filters::ilike_condition("ci", &term),
                ]),
            ),
            ("status", status_list(&statuses)),
        ];

        let rows = self
            .client
            .get_many("payments", &params, PAYMENT_SELECT)
            .await?;

        rows.into_iter()
            .map(serde_json::from_value::<PaymentSummaryEntity>)
            .collect::<Result<Vec<_>, _>>()
            .context("payments row has an unexpected shape")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repository_for(server: &MockServer) -> VerificationPostgrest {
        VerificationPostgrest::new(Arc::new(
            PostgrestClient::new(&server.uri(), "key").unwrap(),
        ))
    }

    #[test]
    fn email_or_ci_filter_targets_embedded_payment() {
        let params = payment_ticket_filters(&PaymentTicketFilter::EmailOrCi {
            term: "ana".to_string(),
            statuses: PaymentStatus::verification_set(false).to_vec(),
        });

        assert_eq!(
            params,
            vec![
                ("or", "(payments.email.ilike.*ana*,payments.ci.ilike.*ana*)".to_string()),
                ("payments.status", "in.(approved)".to_string()),
            ]
        );
    }

    #[test]
    fn email_only_and_id_filters() {
        let params = payment_ticket_filters(&PaymentTicketFilter::EmailOnly {
            term: "ana".to_string(),
            statuses: vec![PaymentStatus::Approved, PaymentStatus::Pending],
        });
        assert_eq!(
            params,
            vec![
                ("payments.email", "ilike.*ana*".to_string()),
                ("payments.status", "in.(approved,pending)".to_string()),
            ]
        );

        let params = payment_ticket_filters(&PaymentTicketFilter::PaymentIds(vec![
            "p-1".to_string(),
            "p-2".to_string(),
        ]));
        assert_eq!(params, vec![("payment_id", "in.(p-1,p-2)".to_string())]);
    }

    #[tokio::test]
    async fn payments_lookup_matches_email_or_ci() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/payments"))
            .and(query_param("select", PAYMENT_SELECT))
            .and(query_param("or", "(email.ilike.*22321331*,ci.ilike.*22321331*)"))
            .and(query_param("status", "in.(approved)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "p-1",
                "email": "ana@example.com",
                "ci": "22321331",
                "status": "approved",
                "created_at": "2025-03-01T00:00:00Z"
            }])))
            .mount(&server)
            .await;

        let payments = repository_for(&server)
            .find_payments("22321331".to_string(), vec![PaymentStatus::Approved])
            .await
            .unwrap();

        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].id, "p-1");
        assert_eq!(payments[0].ci.as_deref(), Some("22321331"));
    }

    #[tokio::test]
    async fn payment_tickets_are_decoded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/payment_tickets"))
            .and(query_param("select", PAYMENT_TICKET_SELECT))
            .and(query_param("payment_id", "in.(p-1)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "payments": { "id": "p-1", "status": "approved" },
                "tickets": { "id": "t-1", "ticket_number": 12, "raffles": { "name": "TV" } }
            }])))
            .mount(&server)
            .await;

        let rows = repository_for(&server)
            .find_payment_tickets(PaymentTicketFilter::PaymentIds(vec!["p-1".to_string()]))
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        let flat = rows[0].to_verification_row();
        assert_eq!(flat.raffle_name.as_deref(), Some("TV"));
        assert_eq!(flat.ticket_number, Some(12));
    }
}
