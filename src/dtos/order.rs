use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub user_id: i64,
    pub status: String,
    pub total_amount: f64,
    pub order_items: serde_json::Value,
    pub shipping_address: Option<serde_json::Value>,
    pub stripe_session_id: String,
    pub created_at: String,
}

impl From<crate::models::order::Order> for OrderResponse {
    fn from(order: crate::models::order::Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            status: order.status,
            total_amount: order.total_amount,
            order_items: order.order_items,
            shipping_address: order.shipping_address,
            stripe_session_id: order.stripe_session_id,
            created_at: order.created_at.to_rfc3339(),
        }
    }
}
