use axum::{Router, routing::get, middleware};
use crate::state::AppState;
use crate::handlers::profile::{get_profile, upsert_profile};
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(upsert_profile))
        .layer(middleware::from_fn(require_auth))
}
