//! Authentication and account management.

mod errors;
mod models;
mod password;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use token::*;

pub(crate) use repository::PgAuthRepository;
