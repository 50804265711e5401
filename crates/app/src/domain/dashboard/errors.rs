//! Dashboard service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardServiceError {
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for DashboardServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
