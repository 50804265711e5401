//! Reset Password Handler

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

/// Reset Password Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

/// Reset Password Handler
///
/// Consumes a reset code and sets a new password.
#[endpoint(
    tags("auth"),
    summary = "Reset password",
    responses(
        (status_code = StatusCode::OK, description = "Password updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid or expired code"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ResetPasswordRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    state
        .app
        .auth
        .reset_password(&request.email, &request.otp, &request.new_password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse {
        message: "Password updated".to_string(),
    }))
}
