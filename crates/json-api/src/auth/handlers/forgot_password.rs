//! Forgot Password Handler

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

/// Forgot Password Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ForgotPasswordRequest {
    pub email: String,
}

/// Forgot Password Handler
///
/// Emails a reset code to the account holder.
#[endpoint(
    tags("auth"),
    summary = "Request a password reset",
    responses(
        (status_code = StatusCode::OK, description = "Reset code sent"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown email"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ForgotPasswordRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .forgot_password(&json.into_inner().email)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse {
        message: "A reset code has been sent to your email".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use atelier_app::auth::{AuthServiceError, MockAuthService};

    use crate::test_helpers::{TestState, public_service};

    use super::*;

    fn service_with(auth: MockAuthService) -> Service {
        public_service(
            TestState {
                auth,
                ..TestState::default()
            },
            Router::with_path("auth/forgot-password").post(handler),
        )
    }

    #[tokio::test]
    async fn known_email_returns_200() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_forgot_password()
            .once()
            .withf(|email| email == "asha@example.com")
            .return_once(|_| Ok(()));

        let res = TestClient::post("http://example.com/auth/forgot-password")
            .json(&json!({ "email": "asha@example.com" }))
            .send(&service_with(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_email_returns_404() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_forgot_password()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::post("http://example.com/auth/forgot-password")
            .json(&json!({ "email": "nobody@example.com" }))
            .send(&service_with(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
