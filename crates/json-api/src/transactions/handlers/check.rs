//! Purchase Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, state::State, transactions::errors::into_status_error};

/// Purchase Status Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseStatusResponse {
    /// Whether the caller may download the design's private documentation
    #[serde(rename = "isPurchased")]
    pub is_purchased: bool,
}

/// Purchase Status Handler
///
/// Entitlement check: true for admins and for buyers with a completed
/// transaction for the design.
#[endpoint(
    tags("transactions"),
    summary = "Check Purchase Status",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    design: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PurchaseStatusResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let is_purchased = state
        .app
        .transactions
        .is_purchased(user, design.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(PurchaseStatusResponse { is_purchased }))
}
