//! Appointment error mapping.

use salvo::http::StatusError;
use tracing::error;

use atelier_app::domain::appointments::AppointmentsServiceError;

pub(crate) fn into_status_error(error: AppointmentsServiceError) -> StatusError {
    match error {
        AppointmentsServiceError::NotFound => {
            StatusError::not_found().brief("Appointment not found")
        }
        AppointmentsServiceError::InvalidTransition => {
            StatusError::bad_request().brief("Invalid status transition")
        }
        AppointmentsServiceError::Invalid(message) => StatusError::bad_request().brief(message),
        AppointmentsServiceError::Sql(source) => {
            error!("appointments storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
