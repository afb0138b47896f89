pub mod errors;
pub mod exchange_rates;
pub mod health;
pub mod payment_webhook;
pub mod payments;
pub mod reservations;
pub mod upload_signatures;
pub mod verification;
