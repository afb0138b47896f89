use serde::{Deserialize, Serialize};

pub const DEFAULT_RESERVATION_MINUTES: i64 = 10;

/// Parameters of the `reserve_tickets` RPC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReserveTicketsModel {
    #[serde(default)]
    pub p_ticket_ids: Vec<String>,
    pub p_session_id: String,
    #[serde(default)]
    pub p_minutes: Option<i64>,
}

/// Parameters of the `release_tickets` RPC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReleaseTicketsModel {
    #[serde(default)]
    pub p_ticket_ids: Vec<String>,
    pub p_session_id: String,
}

/// Parameters of the `ensure_and_reserve_random_tickets` RPC.
///
/// `p_total` is never trusted from the caller; it is replaced by the raffle's
/// stored `total_tickets` before the call goes out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReserveRandomTicketsModel {
    pub p_raffle_id: String,
    pub p_total: i64,
    pub p_session_id: String,
    pub p_quantity: i64,
    #[serde(default)]
    pub p_minutes: Option<i64>,
}

impl ReserveTicketsModel {
    pub fn with_default_minutes(mut self) -> Self {
        self.p_minutes = Some(self.p_minutes.unwrap_or(DEFAULT_RESERVATION_MINUTES));
        self
    }
}

impl ReserveRandomTicketsModel {
    pub fn with_default_minutes(mut self) -> Self {
        self.p_minutes = Some(self.p_minutes.unwrap_or(DEFAULT_RESERVATION_MINUTES));
        self
    }
}
