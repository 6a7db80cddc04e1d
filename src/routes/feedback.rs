use axum::{Router, routing::{get, post}, middleware};
use crate::state::AppState;
use crate::handlers::feedback::{create_feedback, list_feedback};
use crate::middleware::auth::require_admin;

pub fn routes() -> Router<AppState> {
    let open = Router::new()
        .route("/feedback", post(create_feedback));

    let admin = Router::new()
        .route("/admin/feedback", get(list_feedback))
        .layer(middleware::from_fn(require_admin));

    open.merge(admin)
}
