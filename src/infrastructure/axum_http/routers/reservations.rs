use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;

use crate::{
    application::usecases::reservations::ReservationUseCase,
    domain::{
        repositories::reservations::ReservationRepository,
        value_objects::reservations::{
            ReleaseTicketsModel, ReserveRandomTicketsModel, ReserveTicketsModel,
        },
    },
    infrastructure::postgrest::{
        postgrest_client::PostgrestClient, repositories::reservations::ReservationPostgrest,
    },
};

pub fn routes(postgrest_client: Arc<PostgrestClient>) -> Router {
    let reservation_repository = ReservationPostgrest::new(postgrest_client);
    let reservation_usecase = ReservationUseCase::new(Arc::new(reservation_repository));

    router(Arc::new(reservation_usecase))
}

pub fn router<R>(reservation_usecase: Arc<ReservationUseCase<R>>) -> Router
where
    R: ReservationRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/ids", post(reserve_by_ids::<R>))
        .route("/release", post(release::<R>))
        .route("/random", post(reserve_random::<R>))
        .with_state(reservation_usecase)
}

pub async fn reserve_by_ids<R>(
    State(reservation_usecase): State<Arc<ReservationUseCase<R>>>,
    Json(body): Json<ReserveTicketsModel>,
) -> Response
where
    R: ReservationRepository + Send + Sync + 'static,
{
    match reservation_usecase.reserve_by_ids(body).await {
        Ok(data) => Json(json!({ "ok": true, "data": data })).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn release<R>(
    State(reservation_usecase): State<Arc<ReservationUseCase<R>>>,
    Json(body): Json<ReleaseTicketsModel>,
) -> Response
where
    R: ReservationRepository + Send + Sync + 'static,
{
    match reservation_usecase.release(body).await {
        Ok(data) => Json(json!({ "ok": true, "data": data })).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn reserve_random<R>(
    State(reservation_usecase): State<Arc<ReservationUseCase<R>>>,
    Json(body): Json<ReserveRandomTicketsModel>,
) -> Response
where
    R: ReservationRepository + Send + Sync + 'static,
{
    match reservation_usecase.reserve_random(body).await {
        Ok(data) => Json(json!({ "ok": true, "data": data })).into_response(),
        Err(err) => err.into_response(),
    }
}
