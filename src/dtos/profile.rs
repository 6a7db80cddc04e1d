use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
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
    pub updated_at: Option<String>,
}

impl From<crate::models::user::Profile> for ProfileResponse {
    fn from(p: crate::models::user::Profile) -> Self {
        Self {
            user_id: p.user_id,
            full_name: p.full_name,
            email: p.email,
            address_line_1: p.address_line_1,
            address_line_2: p.address_line_2,
            city: p.city,
            postal_code: p.postal_code,
            country: p.country,
            phone: p.phone,
            is_admin: p.is_admin,
            updated_at: p.updated_at.map(|dt| dt.to_rfc3339()),
        }
    }
}
