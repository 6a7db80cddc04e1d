// src/dtos/product.rs
use serde::{Deserialize, Serialize};

// All fields optional so missing ones map to a 400 instead of a
// deserialization failure, matching the storefront's "Missing fields" check.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub image: String,
    pub created_at: Option<String>,
}

// Convert from Model to Response DTO
impl From<crate::models::product::Product> for ProductResponse {
    fn from(product: crate::models::product::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            description: product.description,
            image: product.image,
            created_at: product.created_at.map(|dt| dt.to_rfc3339()),
        }
    }
}
