//! Purchases and entitlements

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::TransactionsServiceError;
pub use models::*;
pub use service::*;
