//! Transaction error mapping.

use salvo::http::StatusError;
use tracing::error;

use atelier_app::domain::transactions::TransactionsServiceError;

pub(crate) fn into_status_error(error: TransactionsServiceError) -> StatusError {
    match error {
        TransactionsServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        TransactionsServiceError::InvalidSignature => {
            StatusError::forbidden().brief("Invalid payment signature")
        }
        TransactionsServiceError::Gateway(source) => {
            error!("payment gateway error: {source}");

            StatusError::internal_server_error()
        }
        TransactionsServiceError::Sql(source) => {
            error!("transactions storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
