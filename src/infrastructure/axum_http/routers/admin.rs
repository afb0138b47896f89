use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;

use crate::{
    application::usecases::payments::PaymentUseCase,
    domain::{
        repositories::payments::PaymentRepository,
        value_objects::payments::ApprovePaymentModel,
    },
    infrastructure::postgrest::{
        postgrest_client::PostgrestClient, repositories::payments::PaymentPostgrest,
    },
};

pub fn routes(postgrest_client: Arc<PostgrestClient>) -> Router {
    let payment_repository = PaymentPostgrest::new(postgrest_client);
    let payment_usecase = PaymentUseCase::new(Arc::new(payment_repository));

    router(Arc::new(payment_usecase))
}

pub fn router<P>(payment_usecase: Arc<PaymentUseCase<P>>) -> Router
where
    P: PaymentRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/approve-payment", post(approve_payment::<P>))
        .with_state(payment_usecase)
}

pub async fn approve_payment<P>(
    State(payment_usecase): State<Arc<PaymentUseCase<P>>>,
    Json(body): Json<ApprovePaymentModel>,
) -> Response
where
    P: PaymentRepository + Send + Sync + 'static,
{
    match payment_usecase.approve(body).await {
        Ok(result) => Json(json!({ "ok": true, "result": result })).into_response(),
        Err(err) => err.into_response(),
    }
}
