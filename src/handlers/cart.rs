// src/handlers/cart.rs
//
// Carts are addressed by an opaque client-chosen id (the storefront keeps a
// random id where its localStorage key used to live). The stored document
// is one JSON array per cart; every mutation rewrites the whole list.
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;

use crate::cart::Cart;
use crate::dtos::cart::{AddCartItemRequest, CartResponse, UpdateCartItemRequest};
use crate::error::AppError;
use crate::models::product::Product;
use crate::state::AppState;

// GET /cart/:cart_id
#[instrument(skip(state))]
pub async fn get_cart(
    Path(cart_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CartResponse>, AppError> {
    let cart_id = validate_cart_id(&cart_id)?;
    let cart = load_cart(&state, cart_id).await?;
    Ok(Json(CartResponse::from(&cart)))
}

// POST /cart/:cart_id/items - add a product, merging by product id
#[instrument(skip(state, payload))]
pub async fn add_item(
    Path(cart_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<AddCartItemRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let cart_id = validate_cart_id(&cart_id)?;

    let product = sqlx::query_as::<_, Product>(
        "SELECT id, name, price::FLOAT8 AS price, description, image, created_at
         FROM products WHERE id = $1"
    )
    .bind(payload.product_id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    let mut cart = load_cart(&state, cart_id).await?;
    cart.add(product.id, &product.name, product.price);
    save_cart(&state, cart_id, &cart).await?;

    Ok(Json(CartResponse::from(&cart)))
}

// PATCH /cart/:cart_id/items/:product_id - adjust quantity by delta;
// the entry disappears when the quantity reaches zero or below
#[instrument(skip(state, payload), fields(product_id))]
pub async fn update_item(
    Path((cart_id, product_id)): Path<(String, i64)>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateCartItemRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let cart_id = validate_cart_id(&cart_id)?;

    let mut cart = load_cart(&state, cart_id).await?;
    cart.update_quantity(product_id, payload.delta);
    save_cart(&state, cart_id, &cart).await?;

    Ok(Json(CartResponse::from(&cart)))
}

// DELETE /cart/:cart_id/items/:product_id
#[instrument(skip(state), fields(product_id))]
pub async fn remove_item(
    Path((cart_id, product_id)): Path<(String, i64)>,
    State(state): State<AppState>,
) -> Result<Json<CartResponse>, AppError> {
    let cart_id = validate_cart_id(&cart_id)?;

    let mut cart = load_cart(&state, cart_id).await?;
    cart.remove(product_id);
    save_cart(&state, cart_id, &cart).await?;

    Ok(Json(CartResponse::from(&cart)))
}

// DELETE /cart/:cart_id - empty the cart (used after a successful checkout)
#[instrument(skip(state))]
pub async fn clear_cart(
    Path(cart_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CartResponse>, AppError> {
    let cart_id = validate_cart_id(&cart_id)?;

    let mut cart = load_cart(&state, cart_id).await?;
    cart.clear();
    save_cart(&state, cart_id, &cart).await?;

    Ok(Json(CartResponse::from(&cart)))
}

fn validate_cart_id(cart_id: &str) -> Result<&str, AppError> {
    let ok = !cart_id.is_empty()
        && cart_id.len() <= 64
        && cart_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(cart_id)
    } else {
        Err(AppError::validation("Invalid cart id"))
    }
}

async fn load_cart(state: &AppState, cart_id: &str) -> Result<Cart, AppError> {
    let raw = sqlx::query_scalar::<_, String>(
        "SELECT items FROM carts WHERE id = $1"
    )
    .bind(cart_id)
    .fetch_optional(&state.db_pool)
    .await?;

    // An unknown cart id is just an empty cart; a corrupt document resets
    // to empty inside Cart::from_json.
    Ok(raw.map(|r| Cart::from_json(&r)).unwrap_or_default())
}

async fn save_cart(state: &AppState, cart_id: &str, cart: &Cart) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO carts (id, items, updated_at) VALUES ($1, $2, NOW())
         ON CONFLICT (id) DO UPDATE SET items = EXCLUDED.items, updated_at = NOW()"
    )
    .bind(cart_id)
    .bind(cart.to_json())
    .execute(&state.db_pool)
    .await?;

    tracing::debug!(cart_id, item_count = cart.item_count(), "Cart updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_cart_id;

    #[test]
    fn cart_id_accepts_uuid_style_tokens() {
        assert!(validate_cart_id("3f2b6a1e-9c7d-4e21-b1aa-0d9f2c8e4a55").is_ok());
        assert!(validate_cart_id("cart_123").is_ok());
    }

    #[test]
    fn cart_id_rejects_empty_long_or_odd_characters() {
        assert!(validate_cart_id("").is_err());
        assert!(validate_cart_id(&"x".repeat(65)).is_err());
        assert!(validate_cart_id("abc/def").is_err());
        assert!(validate_cart_id("abc def").is_err());
    }
}
