// src/state.rs
use sqlx::PgPool;

use crate::services::storage::ImageStore;
use crate::services::stripe::StripeClient;

/// Drop any trailing slash so URL concatenation never doubles one.
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub stripe: StripeClient,
    pub images: ImageStore,
    pub public_base_url: String,
}

impl AppState {
    pub fn new(
        db_pool: PgPool,
        stripe: StripeClient,
        images: ImageStore,
        public_base_url: String,
    ) -> Self {
        Self { db_pool, stripe, images, public_base_url }
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_base_url;

    #[test]
    fn normalize_base_url_strips_trailing_slashes() {
        assert_eq!(normalize_base_url("https://shop.example/"), "https://shop.example");
        assert_eq!(normalize_base_url("https://shop.example"), "https://shop.example");
        assert_eq!(normalize_base_url("http://localhost:3000//"), "http://localhost:3000");
    }
}
