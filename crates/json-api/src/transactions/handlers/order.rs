//! Create Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, state::State, transactions::errors::into_status_error};

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// The design being licensed
    pub design_uuid: Uuid,
}

/// Gateway order handed back to the client for checkout.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub order_id: String,

    /// Amount due in minor currency units
    pub amount: u64,

    pub currency: String,
}

/// Create Order Handler
///
/// Creates a gateway order for a design and records a `pending`
/// transaction.
#[endpoint(
    tags("transactions"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::NOT_FOUND, description = "Design not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Gateway failure"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let placed = state
        .app
        .transactions
        .create_order(user, json.into_inner().design_uuid.into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(OrderResponse {
        order_id: placed.order_id,
        amount: placed.amount,
        currency: placed.currency,
    }))
}
