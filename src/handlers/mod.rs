pub mod cart;
pub mod checkout;
pub mod feedback;
pub mod favorite;
pub mod order;
pub mod product;
pub mod profile;
pub mod upload;
pub mod user;
