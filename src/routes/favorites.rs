use axum::{Router, routing::get, middleware};
use crate::state::AppState;
use crate::handlers::favorite::{list_favorites, favorite_status, toggle_favorite};
use crate::middleware::auth::require_auth;

// All favorite routes need a signed-in user; anonymous callers get a 401
// and the storefront shows its auth prompt.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list_favorites))
        .route("/favorites/{product_id}", get(favorite_status).put(toggle_favorite))
        .layer(middleware::from_fn(require_auth))
}
