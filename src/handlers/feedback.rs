use axum::{extract::State, Json};
use axum::http::StatusCode;
use tracing::instrument;

use crate::dtos::feedback::{CreateFeedbackRequest, FeedbackResponse};
use crate::error::AppError;
use crate::models::feedback::Feedback;
use crate::state::AppState;

// POST /feedback - append-only, open to anyone
#[instrument(skip(state, payload))]
pub async fn create_feedback(
    State(state): State<AppState>,
    Json(payload): Json<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>), AppError> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(AppError::validation("Message required"));
    }

    let feedback = sqlx::query_as::<_, Feedback>(
        "INSERT INTO feedback (message) VALUES ($1)
         RETURNING id, message, created_at"
    )
    .bind(message)
    .fetch_one(&state.db_pool)
    .await?;

    Ok((StatusCode::CREATED, Json(FeedbackResponse::from(feedback))))
}

// GET /admin/feedback - newest first
#[instrument(skip(state))]
pub async fn list_feedback(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeedbackResponse>>, AppError> {
    let feedback = sqlx::query_as::<_, Feedback>(
        "SELECT id, message, created_at FROM feedback ORDER BY created_at DESC"
    )
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(feedback.into_iter().map(FeedbackResponse::from).collect()))
}
