use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RaffleEntity {
    pub id: String,
    pub total_tickets: i64,
}
