pub mod health;
pub mod payments;
pub mod rate_mirrors;
pub mod reservations;
pub mod verification;
