use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::payment_statuses::PaymentStatus;

pub const MIN_QUERY_CHARS: usize = 2;

/// Minimum number of digits a query needs before the digit-only retry is tried.
pub const MIN_DIGITS_FOR_RETRY: usize = 4;

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyQuery {
    pub q: Option<String>,
    pub include_pending: Option<String>,
}

/// Uniform shape returned by the fallback paths of the verification lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VerificationRow {
    pub raffle_id: Option<String>,
    pub raffle_name: Option<String>,
    pub ticket_id: Option<String>,
    pub ticket_number: Option<i64>,
    pub ticket_status: Option<String>,
    pub payment_id: Option<String>,
    pub payment_status: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum VerifiedTickets {
    /// Rows exactly as produced by the `verify_tickets` RPC.
    Rpc(Vec<Value>),
    Projected(Vec<VerificationRow>),
}

impl VerifiedTickets {
    pub fn len(&self) -> usize {
        match self {
            VerifiedTickets::Rpc(rows) => rows.len(),
            VerifiedTickets::Projected(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentTicketFilter {
    /// Substring match on payment email or CI.
    EmailOrCi {
        term: String,
        statuses: Vec<PaymentStatus>,
    },
    /// Substring match on payment email only, for schemas without a `ci` column.
    EmailOnly {
        term: String,
        statuses: Vec<PaymentStatus>,
    },
    PaymentIds(Vec<String>),
}

pub fn digits_only(query: &str) -> String {
    query.chars().filter(char::is_ascii_digit).collect()
}
