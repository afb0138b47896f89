pub mod payment_tickets;
pub mod payments;
pub mod raffles;
