//! Downloads service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadsServiceError {
    /// The design, the requested resource, or the stored object is missing.
    /// Storage failures surface as this too, so provider internals never
    /// leak to callers.
    #[error("file not found")]
    NotFound,

    #[error("authentication required")]
    Unauthorized,

    #[error("purchase required")]
    Forbidden,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for DownloadsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
