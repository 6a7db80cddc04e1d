use axum::{Router, routing::{get, patch}, middleware};
use crate::state::AppState;
use crate::handlers::order::{my_orders, list_orders, update_order_status};
use crate::middleware::auth::{require_auth, require_admin};

pub fn routes() -> Router<AppState> {
    let mine = Router::new()
        .route("/orders", get(my_orders))
        .layer(middleware::from_fn(require_auth));

    let admin = Router::new()
        .route("/admin/orders", get(list_orders))
        .route("/admin/orders/{id}/status", patch(update_order_status))
        .layer(middleware::from_fn(require_admin));

    mine.merge(admin)
}
