pub mod filters;
pub mod postgrest_client;
pub mod repositories;
