//! Consultation appointments

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::AppointmentsServiceError;
pub use models::*;
pub use service::*;
