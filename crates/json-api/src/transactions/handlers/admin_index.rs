//! Sales Ledger Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use atelier_app::domain::{paging::Page, transactions::SaleRecord};

use crate::{
    extensions::*,
    state::State,
    transactions::{errors::into_status_error, my_orders::TransactionResponse},
};

/// Ledger page size when the client does not ask for one.
const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SaleResponse {
    pub transaction: TransactionResponse,

    pub buyer_name: String,

    pub buyer_email: String,
}

impl From<SaleRecord> for SaleResponse {
    fn from(sale: SaleRecord) -> Self {
        Self {
            transaction: sale.transaction.into(),
            buyer_name: sale.buyer_name,
            buyer_email: sale.buyer_email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SalesResponse {
    /// One page of completed sales, newest first
    pub sales: Vec<SaleResponse>,

    /// Total sales matching the search
    pub total: u64,

    /// The returned page number
    pub page: u32,

    /// Total page count at this limit
    pub pages: u32,
}

/// Sales Ledger Handler
///
/// Admin only. Returns one page of completed sales, searchable by design
/// title or payment id via `search`, with `page` and `limit` pagination.
#[endpoint(
    tags("transactions"),
    summary = "Sales Ledger",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<SalesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = Page::new(
        req.query::<u32>("page").unwrap_or(1),
        req.query::<u32>("limit").unwrap_or(DEFAULT_LIMIT),
    );

    let sales = state
        .app
        .transactions
        .sales_history(req.query::<String>("search"), page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(SalesResponse {
        sales: sales.sales.into_iter().map(Into::into).collect(),
        total: sales.total,
        page: sales.page,
        pages: sales.pages,
    }))
}
