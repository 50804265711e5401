//! Design error mapping.

use salvo::http::StatusError;
use tracing::error;

use atelier_app::domain::designs::DesignsServiceError;

pub(crate) fn into_status_error(error: DesignsServiceError) -> StatusError {
    match error {
        DesignsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Design already exists")
        }
        DesignsServiceError::NotFound => StatusError::not_found().brief("Design not found"),
        DesignsServiceError::InvalidReference
        | DesignsServiceError::MissingRequiredData
        | DesignsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid design payload")
        }
        DesignsServiceError::Sql(source) => {
            error!("designs storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
