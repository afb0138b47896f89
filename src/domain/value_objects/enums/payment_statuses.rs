use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Underpaid,
    Overpaid,
    RefMismatch,
}

const APPROVED_ONLY: &[PaymentStatus] = &[PaymentStatus::Approved];

const APPROVED_OR_OPEN: &[PaymentStatus] = &[
    PaymentStatus::Approved,
    PaymentStatus::Pending,
    PaymentStatus::Underpaid,
    PaymentStatus::Overpaid,
    PaymentStatus::RefMismatch,
];

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Approved => "approved",
            PaymentStatus::Underpaid => "underpaid",
            PaymentStatus::Overpaid => "overpaid",
            PaymentStatus::RefMismatch => "ref_mismatch",
        }
    }

    /// Statuses a ticket holder may see when verifying their purchases.
    pub fn verification_set(include_pending: bool) -> &'static [PaymentStatus] {
        if include_pending {
            APPROVED_OR_OPEN
        } else {
            APPROVED_ONLY
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "approved" => Ok(PaymentStatus::Approved),
            "underpaid" => Ok(PaymentStatus::Underpaid),
            "overpaid" => Ok(PaymentStatus::Overpaid),
            "ref_mismatch" => Ok(PaymentStatus::RefMismatch),
            other => Err(format!("Unsupported payment status: {}", other)),
        }
    }
}
