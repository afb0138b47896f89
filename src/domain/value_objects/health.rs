use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DbHealthModel {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Which settings are present. Never carries the values of secrets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvHealthModel {
    pub ok: bool,
    pub stage: String,
    pub supabase_url: bool,
    pub supabase_service_key: bool,
    pub cloudinary: bool,
    pub cloudinary_upload_preset: bool,
    pub allowed_origins: Vec<String>,
}
