use bcrypt::{hash, verify, DEFAULT_COST};
use crate::dtos::user::{RegisterRequest, UserResponse, LoginRequest, LoginResponse};
use crate::auth::jwt::sign_token;
use crate::error::AppError;
use axum::{extract::State, Json};
use crate::state::AppState;
use crate::middleware::auth::AuthContext;
use axum::extract::Extension;
use tracing::instrument;

#[instrument(skip(state, payload))]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>
) -> Result<(axum::http::StatusCode, Json<UserResponse>), AppError> {
    // Basic validation
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("A valid email is required"));
    }
    if payload.password.len() < 6 {
        return Err(AppError::validation("Password too short"));
    }

    let password_hash = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    let mut tx = state.db_pool.begin().await?;

    let rec = sqlx::query_as::<_, UserInsertReturn>(
        "INSERT INTO users (email, password_hash)
         VALUES ($1, $2)
         RETURNING id, email, created_at"
    )
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        if let Some(db_err) = e.as_database_error() {
            if db_err.code().as_deref() == Some("23505") {
                return AppError::conflict("Email already registered");
            }
        }
        AppError::db(e)
    })?;

    // Every user gets a profile row; is_admin defaults to false and is only
    // ever flipped manually in the database.
    sqlx::query(
        "INSERT INTO profiles (user_id, full_name, email)
         VALUES ($1, $2, $3)"
    )
    .bind(rec.id)
    .bind(&payload.full_name)
    .bind(&email)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(UserResponse {
            id: rec.id,
            email: rec.email,
            full_name: payload.full_name,
            is_admin: false,
            created_at: rec.created_at,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>
) -> Result<Json<LoginResponse>, AppError> {
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::validation("Email required"));
    }
    if payload.password.is_empty() {
        return Err(AppError::validation("Password required"));
    }

    let user = sqlx::query_as::<_, UserAuthRow>(
        "SELECT u.id, u.email, u.password_hash, u.created_at,
                COALESCE(p.is_admin, FALSE) AS is_admin,
                p.full_name
         FROM users u
         LEFT JOIN profiles p ON p.user_id = u.id
         WHERE u.email = $1"
    )
    .bind(&email)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::validation("Invalid credentials"))?;

    let ok = verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;

    if !ok {
        return Err(AppError::validation("Invalid credentials"));
    }

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::internal("JWT secret not configured"))?;

    let token = sign_token(user.id, &user.email, user.is_admin, &secret)?;

    // 8 hours = 28800 seconds
    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: 8 * 60 * 60,
        user: UserResponse {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            is_admin: user.is_admin,
            created_at: user.created_at,
        },
    }))
}

// Authenticated endpoint: returns the current user with the admin flag read
// fresh from the profile row (missing row defaults to false).
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>
) -> Result<Json<UserResponse>, AppError> {
    let rec = sqlx::query_as::<_, UserAuthRow>(
        "SELECT u.id, u.email, u.password_hash, u.created_at,
                COALESCE(p.is_admin, FALSE) AS is_admin,
                p.full_name
         FROM users u
         LEFT JOIN profiles p ON p.user_id = u.id
         WHERE u.id = $1"
    )
    .bind(auth.user_id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserResponse {
        id: rec.id,
        email: rec.email,
        full_name: rec.full_name,
        is_admin: rec.is_admin,
        created_at: rec.created_at,
    }))
}

#[derive(sqlx::FromRow)]
struct UserAuthRow {
    id: i64,
    email: String,
    password_hash: String,
    created_at: chrono::DateTime<chrono::Utc>,
    is_admin: bool,
    full_name: Option<String>,
}

#[derive(sqlx::FromRow)]
struct UserInsertReturn {
    id: i64,
    email: String,
    created_at: chrono::DateTime<chrono::Utc>,
}
