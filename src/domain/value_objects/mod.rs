pub mod enums;
pub mod exchange_rates;
pub mod health;
pub mod payments;
pub mod reservations;
pub mod upload_signatures;
pub mod verification;
pub mod webhooks;
