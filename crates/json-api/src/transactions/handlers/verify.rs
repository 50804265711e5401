//! Verify Payment Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use atelier_app::domain::transactions::PaymentCallback;

use crate::{extensions::*, state::State, transactions::errors::into_status_error};

/// Verify Payment Request: the gateway's settlement callback payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyPaymentRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Verify Payment Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyPaymentResponse {
    pub message: String,
}

/// Verify Payment Handler
///
/// Checks the callback signature and completes the matching transaction.
/// Replaying an already-verified payload succeeds without side effects.
#[endpoint(
    tags("transactions"),
    summary = "Verify Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment verified"),
        (status_code = StatusCode::FORBIDDEN, description = "Invalid signature"),
        (status_code = StatusCode::NOT_FOUND, description = "No matching order"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<VerifyPaymentRequest>,
    depot: &mut Depot,
) -> Result<Json<VerifyPaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let request = json.into_inner();

    state
        .app
        .transactions
        .verify_payment(
            user,
            PaymentCallback {
                order_id: request.order_id,
                payment_id: request.payment_id,
                signature: request.signature,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(VerifyPaymentResponse {
        message: "Payment verified".to_string(),
    }))
}
