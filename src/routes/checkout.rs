use axum::{Router, routing::post};
use crate::state::AppState;
use crate::handlers::checkout::{create_checkout_session, process_payment};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(create_checkout_session))
        .route("/process-payment", post(process_payment))
}
