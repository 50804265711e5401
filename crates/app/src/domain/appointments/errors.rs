//! Appointments service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppointmentsServiceError {
    #[error("appointment not found")]
    NotFound,

    #[error("invalid status transition")]
    InvalidTransition,

    #[error("{0}")]
    Invalid(&'static str),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AppointmentsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation) => Self::Invalid("invalid appointment data"),
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
