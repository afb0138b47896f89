pub mod axum_http;
pub mod postgrest;
pub mod rate_mirrors;
