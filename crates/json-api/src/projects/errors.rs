//! Project error mapping.

use salvo::http::StatusError;
use tracing::error;

use atelier_app::domain::projects::ProjectsServiceError;

pub(crate) fn into_status_error(error: ProjectsServiceError) -> StatusError {
    match error {
        ProjectsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Project already exists")
        }
        ProjectsServiceError::NotFound => StatusError::not_found().brief("Project not found"),
        ProjectsServiceError::MissingRequiredData | ProjectsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid project payload")
        }
        ProjectsServiceError::Sql(source) => {
            error!("projects storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
