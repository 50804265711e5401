//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::mailer::MailerError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("an account with this email already exists")]
    AlreadyExists,

    #[error("account not found")]
    NotFound,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("invalid or expired reset code")]
    InvalidOtp,

    #[error("{0}")]
    Invalid(&'static str),

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("password hashing error")]
    PasswordHash(#[source] argon2::password_hash::Error),

    #[error("token encoding error")]
    Token(#[source] jsonwebtoken::errors::Error),

    #[error("failed to send reset email")]
    Mail(#[from] MailerError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
