use axum::{Router, routing::{get, post, patch}};
use crate::state::AppState;
use crate::handlers::cart::{get_cart, add_item, update_item, remove_item, clear_cart};

// Carts work without an account, like the old localStorage cart did.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cart/{cart_id}", get(get_cart).delete(clear_cart))
        .route("/cart/{cart_id}/items", post(add_item))
        .route("/cart/{cart_id}/items/{product_id}", patch(update_item).delete(remove_item))
}
