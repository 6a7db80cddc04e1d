use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::json;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

// GET /favorites - product ids the user has favorited
#[instrument(skip(state))]
pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<i64>>, AppError> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT product_id FROM favorites WHERE user_id = $1 ORDER BY product_id"
    )
    .bind(auth.user_id)
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(ids))
}

// GET /favorites/:product_id
#[instrument(skip(state), fields(product_id))]
pub async fn favorite_status(
    Path(product_id): Path<i64>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<serde_json::Value>, AppError> {
    let favorite = is_favorite(&state, auth.user_id, product_id).await?;
    Ok(Json(json!({ "favorite": favorite })))
}

// PUT /favorites/:product_id - toggle membership of the (user, product)
// pair. The new state is only reported after the row change committed, so
// the client never shows a state the database does not hold.
#[instrument(skip(state), fields(product_id))]
pub async fn toggle_favorite(
    Path(product_id): Path<i64>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<serde_json::Value>, AppError> {
    let product_exists = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM products WHERE id = $1"
    )
    .bind(product_id)
    .fetch_optional(&state.db_pool)
    .await?
    .is_some();

    if !product_exists {
        return Err(AppError::not_found("Product not found"));
    }

    let deleted = sqlx::query(
        "DELETE FROM favorites WHERE user_id = $1 AND product_id = $2"
    )
    .bind(auth.user_id)
    .bind(product_id)
    .execute(&state.db_pool)
    .await?
    .rows_affected();

    let favorite = if deleted == 0 {
        // Nothing to delete, so this toggle is an insert. The unique
        // constraint on (user_id, product_id) keeps concurrent toggles from
        // creating duplicate rows.
        sqlx::query(
            "INSERT INTO favorites (user_id, product_id) VALUES ($1, $2)
             ON CONFLICT (user_id, product_id) DO NOTHING"
        )
        .bind(auth.user_id)
        .bind(product_id)
        .execute(&state.db_pool)
        .await?;
        true
    } else {
        false
    };

    Ok(Json(json!({ "favorite": favorite })))
}

async fn is_favorite(state: &AppState, user_id: i64, product_id: i64) -> Result<bool, AppError> {
    let row = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM favorites WHERE user_id = $1 AND product_id = $2"
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_optional(&state.db_pool)
    .await?;

    Ok(row.is_some())
}
