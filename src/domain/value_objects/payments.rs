use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApprovePaymentModel {
    pub payment_id: String,
    pub approved_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetPaymentCiModel {
    pub payment_id: String,
    pub ci: String,
}
