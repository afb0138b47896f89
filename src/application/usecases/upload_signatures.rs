use sha1::{Digest, Sha1};
use tracing::{error, info};

use crate::{
    application::usecases::errors::{UseCaseError, UseCaseResult},
    config::config_model::Cloudinary,
    domain::value_objects::upload_signatures::{
        DEFAULT_UPLOAD_FOLDER, SignUploadModel, UploadSignatureModel,
    },
};

/// Signs direct browser uploads so the API secret never leaves the server.
pub struct UploadSignatureUseCase {
    credentials: Option<Cloudinary>,
}

impl UploadSignatureUseCase {
    pub fn new(credentials: Option<Cloudinary>) -> Self {
        Self { credentials }
    }

    pub fn sign(
        &self,
        model: SignUploadModel,
        timestamp: i64,
    ) -> UseCaseResult<UploadSignatureModel> {
        let Some(credentials) = self.credentials.as_ref() else {
            error!("upload_signatures: cloudinary credentials are not configured");
            return Err(UseCaseError::NotConfigured(
                "Cloudinary env vars missing".to_string(),
            ));
        };

        let folder = model
            .folder
            .filter(|folder| !folder.is_empty())
            .unwrap_or_else(|| DEFAULT_UPLOAD_FOLDER.to_string());
        let public_id = model.public_id.filter(|id| !id.is_empty());
        let upload_preset = credentials
            .upload_preset
            .clone()
            .filter(|preset| !preset.is_empty());

        let timestamp_text = timestamp.to_string();
        let signature = sign_params(
            &[
                ("folder", Some(folder.as_str())),
                ("timestamp", Some(timestamp_text.as_str())),
                ("upload_preset", upload_preset.as_deref()),
                ("public_id", public_id.as_deref()),
            ],
            &credentials.api_secret,
        );

        info!(
            folder = %folder,
            has_public_id = public_id.is_some(),
            timestamp,
            "upload_signatures: upload signed"
        );

        Ok(UploadSignatureModel {
            signature,
            timestamp,
            api_key: credentials.api_key.clone(),
            cloud_name: credentials.cloud_name.clone(),
            folder,
            public_id,
            upload_preset,
        })
    }
}

/// SHA-1 hex of `k1=v1&k2=v2...<secret>` over the non-empty params sorted by key.
pub fn sign_params(params: &[(&str, Option<&str>)], api_secret: &str) -> String {
    let mut present = params
        .iter()
        .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (*key, v)))
        .collect::<Vec<_>>();
    present.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = present
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
