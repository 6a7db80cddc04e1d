pub mod admin;
pub mod carts;
pub mod checkout;
pub mod favorites;
pub mod feedback;
pub mod orders;
pub mod products;
pub mod profiles;
pub mod users;

use axum::Router;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .merge(users::routes())
        .merge(profiles::routes())
        .merge(favorites::routes())
        .merge(carts::routes())
        .merge(checkout::routes())
        .merge(orders::routes())
        .merge(feedback::routes())
        .merge(admin::routes())
}
