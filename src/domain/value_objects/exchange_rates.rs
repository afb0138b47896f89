use serde::{Deserialize, Serialize};

pub const RATE_SOURCE: &str = "BCV";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangeRateModel {
    pub rate: f64,
    pub source: String,
    /// UTC date the rate was resolved, formatted `YYYYMMDD`.
    pub date: String,
}
