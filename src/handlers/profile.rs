use axum::{extract::{Extension, State}, Json};
use tracing::instrument;

use crate::dtos::profile::{ProfileResponse, UpsertProfileRequest};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::user::Profile;
use crate::state::AppState;

const PROFILE_COLUMNS: &str =
    "user_id, full_name, email, address_line_1, address_line_2, city, postal_code, country, phone, is_admin, updated_at";

// GET /profile - shipping prefill + admin flag for the current user
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = sqlx::query_as::<_, Profile>(
        &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1")
    )
    .bind(auth.user_id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Profile not found"))?;

    Ok(Json(ProfileResponse::from(profile)))
}

// PUT /profile - upsert shipping details; is_admin is never writable here
#[instrument(skip(state, payload))]
pub async fn upsert_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<UpsertProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = sqlx::query_as::<_, Profile>(
        &format!(
            "INSERT INTO profiles (user_id, full_name, email, address_line_1, address_line_2, city, postal_code, country, phone, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
             ON CONFLICT (user_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                email = EXCLUDED.email,
                address_line_1 = EXCLUDED.address_line_1,
                address_line_2 = EXCLUDED.address_line_2,
                city = EXCLUDED.city,
                postal_code = EXCLUDED.postal_code,
                country = EXCLUDED.country,
                phone = EXCLUDED.phone,
                updated_at = NOW()
             RETURNING {PROFILE_COLUMNS}"
        )
    )
    .bind(auth.user_id)
    .bind(&payload.full_name)
    .bind(&payload.email)
    .bind(&payload.address_line_1)
    .bind(&payload.address_line_2)
    .bind(&payload.city)
    .bind(&payload.postal_code)
    .bind(&payload.country)
    .bind(&payload.phone)
    .fetch_one(&state.db_pool)
    .await?;

    Ok(Json(ProfileResponse::from(profile)))
}
