use serde::{Deserialize, Serialize};

const APPROVED_PROVIDER_STATUSES: [&str; 3] = ["approved", "success", "paid"];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentWebhookModel {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookReceiptModel {
    pub received: bool,
    pub processed: bool,
}

impl PaymentWebhookModel {
    pub fn is_approved(&self) -> bool {
        let status = self.status.as_deref().unwrap_or_default().to_lowercase();
        APPROVED_PROVIDER_STATUSES.contains(&status.as_str())
    }
}
