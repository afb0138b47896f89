pub mod admin;
pub mod cloudinary;
pub mod health;
pub mod payments;
pub mod rate;
pub mod reservations;
pub mod verify;
pub mod webhooks;
