use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};

use crate::{
    application::usecases::payment_webhook::PaymentWebhookUseCase,
    domain::{
        repositories::payments::PaymentRepository, value_objects::webhooks::PaymentWebhookModel,
    },
    infrastructure::postgrest::{
        postgrest_client::PostgrestClient, repositories::payments::PaymentPostgrest,
    },
};

pub fn routes(postgrest_client: Arc<PostgrestClient>) -> Router {
    let payment_repository = PaymentPostgrest::new(postgrest_client);
    let payment_webhook_usecase = PaymentWebhookUseCase::new(Arc::new(payment_repository));

    router(Arc::new(payment_webhook_usecase))
}

pub fn router<P>(payment_webhook_usecase: Arc<PaymentWebhookUseCase<P>>) -> Router
where
    P: PaymentRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/payment", post(payment_webhook::<P>))
        .with_state(payment_webhook_usecase)
}

pub async fn payment_webhook<P>(
    State(payment_webhook_usecase): State<Arc<PaymentWebhookUseCase<P>>>,
    Json(payload): Json<PaymentWebhookModel>,
) -> Response
where
    P: PaymentRepository + Send + Sync + 'static,
{
    match payment_webhook_usecase.handle(payload).await {
        Ok(receipt) => Json(receipt).into_response(),
        Err(err) => err.into_response(),
    }
}
