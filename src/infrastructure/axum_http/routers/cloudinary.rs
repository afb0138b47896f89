use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;

use crate::{
    application::usecases::upload_signatures::UploadSignatureUseCase,
    config::config_model::Cloudinary,
    domain::value_objects::upload_signatures::SignUploadModel,
};

pub fn routes(credentials: Option<Cloudinary>) -> Router {
    router(Arc::new(UploadSignatureUseCase::new(credentials)))
}

pub fn router(upload_signature_usecase: Arc<UploadSignatureUseCase>) -> Router {
    Router::new()
        .route("/sign", post(sign_upload))
        .with_state(upload_signature_usecase)
}

pub async fn sign_upload(
    State(upload_signature_usecase): State<Arc<UploadSignatureUseCase>>,
    Json(body): Json<SignUploadModel>,
) -> Response {
    match upload_signature_usecase.sign(body, Utc::now().timestamp()) {
        Ok(signed) => Json(signed).into_response(),
        Err(err) => err.into_response(),
    }
}
