pub mod errors;
pub mod db;
pub mod user;
pub mod user_credentials;
pub mod auth_token;
pub mod service;
pub mod rating;
pub mod review;
pub mod order;
pub mod order_service;

pub use order::OrderStatus;
pub use rating::RATING_SCALE;

#[cfg(test)]
mod tests;
