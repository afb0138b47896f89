use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    application::usecases::exchange_rates::ExchangeRateUseCase,
    domain::repositories::rate_mirrors::RateMirrorClient,
    infrastructure::rate_mirrors::http_mirror::HttpRateMirrorClient,
};

pub fn routes(mirror_client: Arc<HttpRateMirrorClient>) -> Router {
    router(Arc::new(ExchangeRateUseCase::new(mirror_client)))
}

pub fn router<M>(exchange_rate_usecase: Arc<ExchangeRateUseCase<M>>) -> Router
where
    M: RateMirrorClient + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(latest_rate::<M>))
        .with_state(exchange_rate_usecase)
}

pub async fn latest_rate<M>(
    State(exchange_rate_usecase): State<Arc<ExchangeRateUseCase<M>>>,
) -> Response
where
    M: RateMirrorClient + Send + Sync + 'static,
{
    match exchange_rate_usecase.latest_rate().await {
        Ok(rate) => Json(rate).into_response(),
        Err(err) => err.into_response(),
    }
}
