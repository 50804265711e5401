//! Entitlement-gated design downloads

pub mod errors;
pub mod models;
pub mod service;

pub use errors::DownloadsServiceError;
pub use models::*;
pub use service::*;
