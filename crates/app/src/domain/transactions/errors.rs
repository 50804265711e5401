//! Transactions service errors.

use sqlx::Error;
use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Debug, Error)]
pub enum TransactionsServiceError {
    #[error("not found")]
    NotFound,

    #[error("invalid payment signature")]
    InvalidSignature,

    #[error("payment gateway error")]
    Gateway(#[from] GatewayError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for TransactionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
