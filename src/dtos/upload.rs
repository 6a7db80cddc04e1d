use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageRequest {
    pub file_name: Option<String>,
    pub file_base64: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageResponse {
    pub public_url: String,
}
