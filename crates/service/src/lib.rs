//! Service layer providing the booking business operations on top of models.
//! - Separates business logic from data access and from HTTP.
//! - Validates wire input and projects rows into response views.
//! - Provides clear error types and documented interfaces.

mod batch;
pub mod errors;
pub mod validation;
pub mod auth;
pub mod catalog;
pub mod review_service;
pub mod order_service;
#[cfg(test)]
pub mod test_support;
