pub mod health;
pub mod payments;
pub mod reservations;
pub mod verification;
