use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CreateFeedbackRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct FeedbackResponse {
    pub id: i64,
    pub message: String,
    pub created_at: String,
}

impl From<crate::models::feedback::Feedback> for FeedbackResponse {
    fn from(f: crate::models::feedback::Feedback) -> Self {
        Self {
            id: f.id,
            message: f.message,
            created_at: f.created_at.to_rfc3339(),
        }
    }
}
