// src/handlers/checkout.rs
//
// Two-phase checkout: phase one turns the cart into a hosted Stripe
// session the browser is redirected to; phase two runs after Stripe
// redirects back and reconciles the paid session into an order row.
use axum::{extract::State, Json};
use tracing::instrument;

use crate::dtos::checkout::{
    CheckoutRequest, CheckoutResponse, OrderItem, OrderSummary, ProcessPaymentRequest,
    ProcessPaymentResponse,
};
use crate::error::AppError;
use crate::services::stripe::{format_line_items, CheckoutSession, SessionLineItem};
use crate::state::AppState;

// POST /checkout - create a hosted payment session from the cart contents
#[instrument(skip(state, payload))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, AppError> {
    if payload.cart_items.is_empty() {
        return Err(AppError::validation("Cart is empty"));
    }

    let user_email = payload
        .user_email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::validation("User email is required"))?;

    let line_items = format_line_items(&payload.cart_items);

    let success_url = format!(
        "{}/success?session_id={{CHECKOUT_SESSION_ID}}",
        state.public_base_url
    );
    let cancel_url = format!("{}/cart", state.public_base_url);

    let session = state
        .stripe
        .create_checkout_session(&line_items, &user_email, &success_url, &cancel_url)
        .await?;

    Ok(Json(CheckoutResponse { session_id: session.id }))
}

// POST /process-payment - reconcile a paid session into an order row.
// Idempotent: the unique constraint on stripe_session_id plus the
// lookup-first path make a repeated call a no-op returning the existing
// order.
#[instrument(skip(state, payload))]
pub async fn process_payment(
    State(state): State<AppState>,
    Json(payload): Json<ProcessPaymentRequest>,
) -> Result<Json<ProcessPaymentResponse>, AppError> {
    let session_id = payload
        .session_id
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::validation("Session ID is required"))?;

    // Already reconciled? Return the existing order instead of inserting a
    // duplicate.
    if let Some(existing) = fetch_order_by_session(&state, &session_id).await? {
        return Ok(Json(ProcessPaymentResponse { success: true, order: existing }));
    }

    let session = state.stripe.retrieve_checkout_session(&session_id).await?;
    ensure_paid(&session)?;

    let email = session
        .customer_email
        .clone()
        .or_else(|| session.metadata.get("user_email").cloned())
        .ok_or_else(|| AppError::validation("Session has no customer email"))?;

    let user_id = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM users WHERE email = $1"
    )
    .bind(email.trim().to_lowercase())
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("User not found"))?;

    let line_items = session
        .line_items
        .as_ref()
        .map(|l| l.data.as_slice())
        .unwrap_or_default();
    let order_items = derive_order_items(line_items);
    let total_amount = total_from_cents(session.amount_total.unwrap_or(0));

    let shipping_address = session
        .shipping_details
        .clone()
        .or_else(|| session.customer_details.clone());

    let items_json = serde_json::to_value(&order_items)
        .map_err(|e| AppError::internal(format!("Failed to encode order items: {e}")))?;

    let inserted = sqlx::query_as::<_, OrderInsertReturn>(
        "INSERT INTO orders (user_id, status, total_amount, order_items, shipping_address, stripe_session_id)
         VALUES ($1, 'confirmed', $2, $3, $4, $5)
         ON CONFLICT (stripe_session_id) DO NOTHING
         RETURNING id, status, total_amount::FLOAT8 AS total_amount"
    )
    .bind(user_id)
    .bind(total_amount)
    .bind(&items_json)
    .bind(&shipping_address)
    .bind(&session_id)
    .fetch_optional(&state.db_pool)
    .await
    .map_err(|e| {
        tracing::error!(error = ?e, "Failed to create order record");
        AppError::internal("Failed to create order record")
    })?;

    let order = match inserted {
        Some(rec) => {
            log_confirmation_email(&email, rec.id, rec.total_amount, &order_items);
            OrderSummary {
                id: rec.id,
                total_amount: rec.total_amount,
                status: rec.status,
                order_items,
            }
        }
        // A concurrent reconciliation of the same session won the insert;
        // hand back whatever it wrote.
        None => fetch_order_by_session(&state, &session_id)
            .await?
            .ok_or_else(|| AppError::internal("Order vanished after conflict"))?,
    };

    Ok(Json(ProcessPaymentResponse { success: true, order }))
}

/// A session that is not paid must never produce an order row.
fn ensure_paid(session: &CheckoutSession) -> Result<(), AppError> {
    if session.payment_status.as_deref() == Some("paid") {
        Ok(())
    } else {
        Err(AppError::validation("Payment not completed"))
    }
}

/// Derive the denormalized order snapshot from Stripe line items: the unit
/// price is recovered from the line total (cents) divided by the quantity.
pub fn derive_order_items(line_items: &[SessionLineItem]) -> Vec<OrderItem> {
    line_items
        .iter()
        .map(|item| {
            let quantity = item.quantity.unwrap_or(1).max(1);
            let amount_total = item.amount_total.unwrap_or(0);
            OrderItem {
                name: item.description.clone().unwrap_or_default(),
                quantity,
                price: amount_total as f64 / 100.0 / quantity as f64,
            }
        })
        .collect()
}

pub fn total_from_cents(amount_total: i64) -> f64 {
    amount_total as f64 / 100.0
}

async fn fetch_order_by_session(
    state: &AppState,
    session_id: &str,
) -> Result<Option<OrderSummary>, AppError> {
    let rec = sqlx::query_as::<_, OrderSnapshotRow>(
        "SELECT id, status, total_amount::FLOAT8 AS total_amount, order_items
         FROM orders WHERE stripe_session_id = $1"
    )
    .bind(session_id)
    .fetch_optional(&state.db_pool)
    .await?;

    Ok(rec.map(|r| OrderSummary {
        id: r.id,
        total_amount: r.total_amount,
        status: r.status,
        order_items: serde_json::from_value(r.order_items).unwrap_or_default(),
    }))
}

// The original shop only ever logged its confirmation mails; real delivery
// would hang off an email provider here.
fn log_confirmation_email(email: &str, order_id: i64, total_amount: f64, items: &[OrderItem]) {
    tracing::info!(
        email,
        order_number = %format!("{order_id:08}"),
        total = %format!("{total_amount:.2}"),
        item_count = items.len(),
        "Sending order confirmation email"
    );
}

#[derive(sqlx::FromRow)]
struct OrderInsertReturn {
    id: i64,
    status: String,
    total_amount: f64,
}

#[derive(sqlx::FromRow)]
struct OrderSnapshotRow {
    id: i64,
    status: String,
    total_amount: f64,
    order_items: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn session(payment_status: Option<&str>) -> CheckoutSession {
        CheckoutSession {
            id: "cs_test_123".to_string(),
            payment_status: payment_status.map(str::to_string),
            amount_total: Some(2500),
            customer_email: Some("k@example.com".to_string()),
            metadata: HashMap::new(),
            line_items: None,
            shipping_details: None,
            customer_details: None,
        }
    }

    fn line(description: &str, quantity: i64, amount_total: i64) -> SessionLineItem {
        SessionLineItem {
            description: Some(description.to_string()),
            quantity: Some(quantity),
            amount_total: Some(amount_total),
        }
    }

    #[test]
    fn paid_session_passes_the_guard() {
        assert!(ensure_paid(&session(Some("paid"))).is_ok());
    }

    #[test]
    fn unpaid_session_never_reaches_order_creation() {
        for status in [Some("unpaid"), Some("open"), Some("no_payment_required"), None] {
            let err = ensure_paid(&session(status)).unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)));
        }
    }

    #[test]
    fn derive_order_items_recovers_unit_price() {
        let items = derive_order_items(&[line("Gouden ring", 2, 9998)]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Gouden ring");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].price, 49.99);
    }

    #[test]
    fn derive_order_items_guards_missing_quantity() {
        let item = SessionLineItem {
            description: None,
            quantity: None,
            amount_total: Some(500),
        };
        let items = derive_order_items(&[item]);
        assert_eq!(items[0].quantity, 1);
        assert_eq!(items[0].price, 5.0);
        assert_eq!(items[0].name, "");
    }

    #[test]
    fn total_from_cents_converts_to_euros() {
        assert_eq!(total_from_cents(2500), 25.0);
        assert_eq!(total_from_cents(0), 0.0);
        assert_eq!(total_from_cents(1), 0.01);
    }
}
