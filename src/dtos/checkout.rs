use serde::{Deserialize, Serialize};

// Wire names match the storefront's fetch bodies (cartItems, userEmail,
// sessionId), so the same frontend keeps working against this backend.

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutCartItem {
    pub id: Option<i64>,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub quantity: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub cart_items: Vec<CheckoutCartItem>,
    pub user_email: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub session_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentRequest {
    pub session_id: Option<String>,
}

/// Denormalized line snapshot stored on the order row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

#[derive(Serialize)]
pub struct OrderSummary {
    pub id: i64,
    pub total_amount: f64,
    pub status: String,
    pub order_items: Vec<OrderItem>,
}

#[derive(Serialize)]
pub struct ProcessPaymentResponse {
    pub success: bool,
    pub order: OrderSummary,
}
