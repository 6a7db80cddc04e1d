use axum::{routing::get, Router};
use crate::handlers::product::{get_products, get_product};
use crate::state::AppState;

// Storefront reads are public; creation lives under /admin.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(get_products))
        .route("/products/{id}", get(get_product))
}
