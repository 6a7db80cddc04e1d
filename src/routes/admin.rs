use axum::{Router, routing::post, middleware};
use crate::state::AppState;
use crate::handlers::product::create_product;
use crate::handlers::upload::upload_image;
use crate::middleware::auth::require_admin;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/products", post(create_product))
        .route("/admin/upload-image", post(upload_image))
        .layer(middleware::from_fn(require_admin))
}
