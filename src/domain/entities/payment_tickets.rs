use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::verification::VerificationRow;

/// Embedded `payment_tickets` projection:
/// `payments!inner(id,email,ci,status,created_at),tickets(id,ticket_number,status,raffle_id,raffles(name))`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentTicketEntity {
    #[serde(default, alias = "payment")]
    pub payments: Option<EmbeddedPayment>,
    #[serde(default, alias = "ticket")]
    pub tickets: Option<EmbeddedTicket>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmbeddedPayment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub ci: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmbeddedTicket {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub ticket_number: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub raffle_id: Option<String>,
    // Object when the relation is to-one; anything else carries no usable name.
    #[serde(default)]
    pub raffles: Option<Value>,
}

impl EmbeddedTicket {
    pub fn raffle_name(&self) -> Option<String> {
        self.raffles
            .as_ref()
            .and_then(Value::as_object)
            .and_then(|raffle| raffle.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

impl PaymentTicketEntity {
    pub fn to_verification_row(&self) -> VerificationRow {
        let payment = self.payments.clone().unwrap_or_default();
        let ticket = self.tickets.clone().unwrap_or_default();
        let raffle_name = ticket.raffle_name();

        VerificationRow {
            raffle_id: ticket.raffle_id,
            raffle_name,
            ticket_id: ticket.id,
            ticket_number: ticket.ticket_number,
            ticket_status: ticket.status,
            payment_id: payment.id,
            payment_status: payment.status,
            created_at: payment.created_at,
        }
    }
}
