use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Feedback {
    pub id: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
