use chrono::{DateTime, Utc};

// Profile rows back the shipping-form prefill and carry the admin flag.
// One row per user, created empty at registration.
#[derive(Debug, sqlx::FromRow)]
pub struct Profile {
    pub user_id: i64,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub is_admin: bool,
    pub updated_at: Option<DateTime<Utc>>,
}
