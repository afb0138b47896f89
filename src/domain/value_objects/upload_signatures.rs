use serde::{Deserialize, Serialize};

pub const DEFAULT_UPLOAD_FOLDER: &str = "evidence";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SignUploadModel {
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default, rename = "publicId")]
    pub public_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadSignatureModel {
    pub signature: String,
    pub timestamp: i64,
    pub api_key: String,
    pub cloud_name: String,
    pub folder: String,
    pub public_id: Option<String>,
    pub upload_preset: Option<String>,
}
