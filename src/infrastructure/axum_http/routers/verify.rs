use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tracing::error;

use crate::{
    application::usecases::{errors::UseCaseError, verification::VerificationUseCase},
    domain::{
        repositories::verification::VerificationRepository,
        value_objects::verification::VerifyQuery,
    },
    infrastructure::postgrest::{
        postgrest_client::PostgrestClient, repositories::verification::VerificationPostgrest,
    },
};

pub fn routes(postgrest_client: Arc<PostgrestClient>) -> Router {
    let verification_repository = VerificationPostgrest::new(postgrest_client);
    let verification_usecase = VerificationUseCase::new(Arc::new(verification_repository));

    router(Arc::new(verification_usecase))
}

pub fn router<R>(verification_usecase: Arc<VerificationUseCase<R>>) -> Router
where
    R: VerificationRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(verify::<R>))
        .with_state(verification_usecase)
}

/// Lookup failures are answered with 200 and `ok: false` so browsers never
/// surface them as network errors. Only a bad query is a 400.
pub async fn verify<R>(
    State(verification_usecase): State<Arc<VerificationUseCase<R>>>,
    Query(query): Query<VerifyQuery>,
) -> Response
where
    R: VerificationRepository + Send + Sync + 'static,
{
    match verification_usecase.verify(query).await {
        Ok(data) => Json(json!({ "ok": true, "data": data })).into_response(),
        Err(err @ UseCaseError::Validation(_)) => err.into_response(),
        Err(err) => {
            error!(error = ?err, "verify: lookup failed");
            Json(json!({ "ok": false, "data": [], "error": "internal_error" })).into_response()
        }
    }
}
