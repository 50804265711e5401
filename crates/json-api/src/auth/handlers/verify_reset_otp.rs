//! Verify Reset Code Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{errors::into_status_error, handlers::MessageResponse},
    extensions::*,
    state::State,
};

/// Verify Reset Code Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyResetOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Verify Reset Code Handler
///
/// Checks a reset code without consuming it.
#[endpoint(
    tags("auth"),
    summary = "Verify a reset code",
    responses(
        (status_code = StatusCode::OK, description = "Code is valid"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid or expired code"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<VerifyResetOtpRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    state
        .app
        .auth
        .verify_reset_otp(&request.email, &request.otp)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse {
        message: "Code verified".to_string(),
    }))
}
