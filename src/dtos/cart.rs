use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartItem};

#[derive(Deserialize)]
pub struct AddCartItemRequest {
    pub product_id: i64,
}

#[derive(Deserialize)]
pub struct UpdateCartItemRequest {
    pub delta: i32,
}

/// Snapshot returned after every read or mutation. The item count and the
/// formatted total let the header badge recompute without a second request.
#[derive(Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub item_count: i32,
    pub total: f64,
    pub total_display: String,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            item_count: cart.item_count(),
            total: cart.total(),
            total_display: cart.total_display(),
        }
    }
}
