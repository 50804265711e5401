//! Own Purchase History Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use atelier_app::domain::transactions::TransactionRecord;

use crate::{extensions::*, state::State, transactions::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionResponse {
    /// The unique identifier of the transaction
    pub uuid: Uuid,

    /// The licensed design, when it still exists
    pub design_uuid: Option<Uuid>,

    /// Design title snapshot taken at order time
    pub design_title: String,

    /// Amount in minor currency units
    pub amount: u64,

    pub currency: String,

    pub order_id: String,

    pub payment_id: Option<String>,

    /// `pending`, `completed`, or `failed`
    pub status: String,

    /// The date and time the order was placed
    pub created_at: String,
}

impl From<TransactionRecord> for TransactionResponse {
    fn from(transaction: TransactionRecord) -> Self {
        Self {
            uuid: transaction.uuid.into(),
            design_uuid: transaction.design_uuid.map(Into::into),
            design_title: transaction.design_title,
            amount: transaction.amount,
            currency: transaction.currency,
            order_id: transaction.order_id,
            payment_id: transaction.payment_id,
            status: transaction.status.as_str().to_string(),
            created_at: transaction.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionsResponse {
    /// The caller's orders, newest first
    pub transactions: Vec<TransactionResponse>,
}

/// Own Purchase History Handler
///
/// Returns the caller's orders, newest first.
#[endpoint(
    tags("transactions"),
    summary = "My Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<TransactionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let transactions = state
        .app
        .transactions
        .user_transactions(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(TransactionsResponse {
        transactions: transactions.into_iter().map(Into::into).collect(),
    }))
}
