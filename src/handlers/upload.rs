use axum::{extract::State, Json};
use tracing::instrument;

use crate::dtos::upload::{UploadImageRequest, UploadImageResponse};
use crate::error::AppError;
use crate::state::AppState;

// POST /admin/upload-image - store a base64 product image, return its
// public URL. Any storage failure maps to a 400 with the error string.
#[instrument(skip(state, payload))]
pub async fn upload_image(
    State(state): State<AppState>,
    Json(payload): Json<UploadImageRequest>,
) -> Result<Json<UploadImageResponse>, AppError> {
    let file_name = payload
        .file_name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::validation("fileName is required"))?;
    let file_base64 = payload
        .file_base64
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::validation("fileBase64 is required"))?;

    let public_url = state.images.store_base64(&file_name, &file_base64).await?;

    Ok(Json(UploadImageResponse { public_url }))
}
