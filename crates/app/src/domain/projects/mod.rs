//! Portfolio projects

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::ProjectsServiceError;
pub use models::*;
pub use service::*;
