use axum::{
    extract::{Extension, Path, State},
    Json,
};
use tracing::instrument;

use crate::dtos::order::{OrderResponse, UpdateOrderStatusRequest};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::order::{Order, OrderStatus};
use crate::state::AppState;

const ORDER_COLUMNS: &str =
    "id, user_id, status, total_amount::FLOAT8 AS total_amount, order_items, shipping_address, stripe_session_id, created_at";

// GET /orders - the caller's orders, newest first (profile page)
#[instrument(skip(state))]
pub async fn my_orders(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = sqlx::query_as::<_, Order>(
        &format!("SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC")
    )
    .bind(auth.user_id)
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

// GET /admin/orders - every order, newest first
#[instrument(skip(state))]
pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = sqlx::query_as::<_, Order>(
        &format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC")
    )
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

// PATCH /admin/orders/:id/status - advance an order along its lifecycle.
// Only the next step in the chain (or re-setting the current status) is
// accepted; a rejected transition leaves the row untouched.
#[instrument(skip(state, payload), fields(id))]
pub async fn update_order_status(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> Result<Json<OrderResponse>, AppError> {
    let target = OrderStatus::parse(&payload.status)
        .ok_or_else(|| AppError::validation(format!("Unknown status '{}'", payload.status)))?;

    let current_raw = sqlx::query_scalar::<_, String>(
        "SELECT status FROM orders WHERE id = $1"
    )
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Order not found"))?;

    let current = OrderStatus::parse(&current_raw)
        .ok_or_else(|| AppError::internal(format!("Order {id} has corrupt status '{current_raw}'")))?;

    if !current.can_transition_to(target) {
        return Err(AppError::validation(format!(
            "Cannot move order from '{}' to '{}'",
            current.as_str(),
            target.as_str()
        )));
    }

    let order = sqlx::query_as::<_, Order>(
        &format!(
            "UPDATE orders SET status = $1 WHERE id = $2
             RETURNING {ORDER_COLUMNS}"
        )
    )
    .bind(target.as_str())
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Order not found"))?;

    tracing::info!(order_id = id, from = current.as_str(), to = target.as_str(), "Order status updated");

    Ok(Json(OrderResponse::from(order)))
}
