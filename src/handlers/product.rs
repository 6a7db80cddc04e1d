// src/handlers/product.rs
use axum::{
    extract::{Path, State},
    Json,
};
use crate::dtos::product::{CreateProductRequest, ProductResponse};
use crate::models::product::Product;
use crate::state::AppState;
use crate::error::AppError;
use tracing::instrument;

const PRODUCT_COLUMNS: &str = "id, name, price::FLOAT8 AS price, description, image, created_at";

// GET /products - storefront grid
#[instrument(skip(state))]
pub async fn get_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = sqlx::query_as::<_, Product>(
        &format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC, id DESC")
    )
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

// GET /products/:id - product detail page
#[instrument(skip(state), fields(id))]
pub async fn get_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = sqlx::query_as::<_, Product>(
        &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1")
    )
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// POST /admin/products - add a product after its image was uploaded
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let (name, price, image) = match (payload.name, payload.price, payload.image) {
        (Some(n), Some(p), Some(i)) if !n.trim().is_empty() && !i.trim().is_empty() => (n, p, i),
        _ => return Err(AppError::validation("Missing fields")),
    };

    if price <= 0.0 {
        return Err(AppError::validation("Price must be positive"));
    }

    let product = sqlx::query_as::<_, Product>(
        &format!(
            "INSERT INTO products (name, price, description, image)
             VALUES ($1, $2, $3, $4)
             RETURNING {PRODUCT_COLUMNS}"
        )
    )
    .bind(&name)
    .bind(price)
    .bind(&payload.description)
    .bind(&image)
    .fetch_one(&state.db_pool)
    .await?;

    Ok(Json(ProductResponse::from(product)))
}
