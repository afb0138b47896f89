use serde::{Deserialize, Serialize};

/// Row of `payments` as selected by the webhook lookup (`id, reference, status`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentEntity {
    pub id: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Row of `payments` as selected by the verification lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentSummaryEntity {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub ci: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
