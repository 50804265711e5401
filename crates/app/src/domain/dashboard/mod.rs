//! Platform analytics and activity feed

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::DashboardServiceError;
pub use models::*;
pub use service::*;
