//! Auth error mapping.

use salvo::http::StatusError;
use tracing::error;

use atelier_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::AlreadyExists => {
            StatusError::conflict().brief("An account with this email already exists")
        }
        AuthServiceError::NotFound => StatusError::not_found().brief("Account not found"),
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::InvalidToken => {
            StatusError::unauthorized().brief("Invalid or expired token")
        }
        AuthServiceError::InvalidOtp => {
            StatusError::bad_request().brief("Invalid or expired reset code")
        }
        AuthServiceError::Invalid(message) => StatusError::bad_request().brief(message),
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::PasswordHash(source) => {
            error!("password hashing error: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("token encoding error: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Mail(source) => {
            error!("failed to send account email: {source}");

            StatusError::internal_server_error()
        }
    }
}
