use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};

use crate::{
    application::usecases::health::{self, HealthUseCase},
    config::config_model::DotEnvyConfig,
    domain::repositories::health::HealthRepository,
    infrastructure::{
        axum_http::default_routers,
        postgrest::{postgrest_client::PostgrestClient, repositories::health::HealthPostgrest},
    },
};

pub fn routes(postgrest_client: Arc<PostgrestClient>, config: &DotEnvyConfig) -> Router {
    let health_repository = HealthPostgrest::new(postgrest_client);
    let health_usecase =
        HealthUseCase::new(Arc::new(health_repository), health::env_report(config));

    router(Arc::new(health_usecase))
}

pub fn router<H>(health_usecase: Arc<HealthUseCase<H>>) -> Router
where
    H: HealthRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(default_routers::health_check))
        .route("/health/db", get(db::<H>))
        .route("/health/env", get(env::<H>))
        .with_state(health_usecase)
}

pub async fn db<H>(State(health_usecase): State<Arc<HealthUseCase<H>>>) -> impl IntoResponse
where
    H: HealthRepository + Send + Sync + 'static,
{
    Json(health_usecase.check_db().await)
}

pub async fn env<H>(State(health_usecase): State<Arc<HealthUseCase<H>>>) -> impl IntoResponse
where
    H: HealthRepository + Send + Sync + 'static,
{
    Json(health_usecase.env_report())
}
