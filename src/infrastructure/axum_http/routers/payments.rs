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
        repositories::payments::PaymentRepository, value_objects::payments::SetPaymentCiModel,
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
        .route("/set-ci", post(set_ci::<P>))
        .with_state(payment_usecase)
}

pub async fn set_ci<P>(
    State(payment_usecase): State<Arc<PaymentUseCase<P>>>,
    Json(body): Json<SetPaymentCiModel>,
) -> Response
where
    P: PaymentRepository + Send + Sync + 'static,
{
    match payment_usecase.set_ci(body).await {
        Ok(data) => Json(json!({ "ok": true, "data": data })).into_response(),
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::repositories::payments::MockPaymentRepository,
        infrastructure::axum_http::routers::test_support::{post_json, send},
    };
    use axum::http::StatusCode;

    #[tokio::test]
    async fn unmatched_payment_returns_null_data() {
        let mut repo = MockPaymentRepository::new();
        repo.expect_set_payment_ci()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let app = router(Arc::new(PaymentUseCase::new(Arc::new(repo))));
        let (status, body) = send(
            app,
            post_json("/set-ci", json!({ "payment_id": "p-x", "ci": "12345678" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true, "data": null }));
    }

    #[tokio::test]
    async fn empty_ci_is_a_bad_request() {
        let mut repo = MockPaymentRepository::new();
        repo.expect_set_payment_ci().never();

        let app = router(Arc::new(PaymentUseCase::new(Arc::new(repo))));
        let (status, body) = send(
            app,
            post_json("/set-ci", json!({ "payment_id": "p-1", "ci": "  " })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "code": 400, "message": "ci is required" }));
    }
}
