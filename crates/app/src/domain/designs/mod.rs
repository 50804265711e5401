//! Licensable designs

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::DesignsServiceError;
pub use models::*;
pub use service::*;
