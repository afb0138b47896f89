use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::{
    application::usecases::errors::{UseCaseError, UseCaseResult},
    domain::{
        repositories::rate_mirrors::RateMirrorClient,
        value_objects::exchange_rates::{ExchangeRateModel, RATE_SOURCE},
    },
};

/// Public mirrors of the central-bank rate, in priority order.
pub const DEFAULT_RATE_MIRRORS: [&str; 6] = [
    "https://pydolarvenezuela.github.io/api/v1/dollar",
    "https://pydolarvenezuela-api.vercel.app/api/v1/dollar",
    "https://pydolarvenezuela.vercel.app/api/v1/dollar",
    "https://pydolarvenezuela.obh.software/api/v1/dollar",
    "https://dolartoday-api.vercel.app/api/pydolar",
    "https://venezuela-exchange.vercel.app/api",
];

const RATE_KEY_MARKERS: [&str; 3] = ["bcv", "official", "oficial"];
const PRICE_FIELDS: [&str; 5] = ["price", "promedio", "value", "venta", "sell"];

pub struct ExchangeRateUseCase<M>
where
    M: RateMirrorClient + Send + Sync + 'static,
{
    mirror_client: Arc<M>,
    mirrors: Vec<String>,
}

impl<M> ExchangeRateUseCase<M>
where
    M: RateMirrorClient + Send + Sync + 'static,
{
    pub fn new(mirror_client: Arc<M>) -> Self {
        Self::with_mirrors(
            mirror_client,
            DEFAULT_RATE_MIRRORS.iter().map(|url| url.to_string()).collect(),
        )
    }

    pub fn with_mirrors(mirror_client: Arc<M>, mirrors: Vec<String>) -> Self {
        Self {
            mirror_client,
            mirrors,
        }
    }

    /// First mirror with a usable positive rate wins; the rest are not asked.
    pub async fn latest_rate(&self) -> UseCaseResult<ExchangeRateModel> {
        for url in &self.mirrors {
            let payload = match self.mirror_client.fetch_json(url.clone()).await {
                Ok(payload) => payload,
                Err(err) => {
                    debug!(mirror = %url, error = %err, "exchange_rates: mirror failed");
                    continue;
                }
            };

            match scan_rate(&payload) {
                Some(rate) => {
                    info!(mirror = %url, rate, "exchange_rates: rate resolved");
                    return Ok(ExchangeRateModel {
                        rate,
                        source: RATE_SOURCE.to_string(),
                        date: Utc::now().format("%Y%m%d").to_string(),
                    });
                }
                None => debug!(mirror = %url, "exchange_rates: no rate in mirror payload"),
            }
        }

        warn!(
            mirrors = self.mirrors.len(),
            "exchange_rates: every mirror failed"
        );
        Err(UseCaseError::BadGateway(
            "No rate source available".to_string(),
        ))
    }
}

/// Depth-first search for the official rate in a mirror payload of unknown
/// shape. Only objects are descended into, keys in document order.
pub fn scan_rate(payload: &Value) -> Option<f64> {
    payload.as_object().and_then(scan_object)
}

fn scan_object(object: &Map<String, Value>) -> Option<f64> {
    for (key, value) in object {
        let key = key.to_lowercase();

        if RATE_KEY_MARKERS.iter().any(|marker| key.contains(marker)) {
            if let Some(rate) = to_positive_number(value) {
                return Some(rate);
            }
        }

        if key == "bcv" {
            if let Some(nested) = value.as_object() {
                let candidate = PRICE_FIELDS
                    .iter()
                    .filter_map(|field| nested.get(*field))
                    .find(|candidate| is_truthy(candidate));
                if let Some(rate) = candidate.and_then(to_positive_number) {
                    return Some(rate);
                }
            }
        }

        if let Some(nested) = value.as_object() {
            if let Some(rate) = scan_object(nested) {
                return Some(rate);
            }
        }
    }

    None
}

/// Accepts JSON numbers and numeric strings; strings use `.` for thousands
/// and `,` for decimals (`"4.567,89"` is 4567.89).
pub fn to_positive_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(raw) => raw
            .trim()
            .replace('.', "")
            .replace(',', ".")
            .parse::<f64>()
            .ok()?,
        _ => return None,
    };

    (number.is_finite() && number > 0.0).then_some(number)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
