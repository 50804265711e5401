//! Design Sales Stats Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use atelier_app::domain::transactions::{BuyerRecord, DesignSales};

use crate::{extensions::*, state::State, transactions::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BuyerResponse {
    pub name: String,

    pub email: String,

    /// When the purchase completed
    pub purchased_at: String,
}

impl From<BuyerRecord> for BuyerResponse {
    fn from(buyer: BuyerRecord) -> Self {
        Self {
            name: buyer.name,
            email: buyer.email,
            purchased_at: buyer.purchased_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DesignStatsResponse {
    /// Completed sales count
    pub total_sales: u64,

    /// Revenue sum in minor currency units
    pub total_revenue: u64,

    /// Most recent buyers, newest first
    pub recent_buyers: Vec<BuyerResponse>,
}

impl From<DesignSales> for DesignStatsResponse {
    fn from(sales: DesignSales) -> Self {
        Self {
            total_sales: sales.total_sales,
            total_revenue: sales.total_revenue,
            recent_buyers: sales.recent_buyers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Design Sales Stats Handler
///
/// Admin only. Aggregates completed sales for one design.
#[endpoint(
    tags("transactions"),
    summary = "Design Sales Stats",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    design: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<DesignStatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state
        .app
        .transactions
        .design_stats(design.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(stats.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use atelier_app::domain::{designs::DesignUuid, transactions::MockTransactionsService};

    use crate::test_helpers::{TestState, admin_service};

    use super::*;

    #[tokio::test]
    async fn aggregates_completed_sales() -> TestResult {
        let design = DesignUuid::new();

        let mut transactions = MockTransactionsService::new();
        transactions
            .expect_design_stats()
            .once()
            .withf(move |requested| *requested == design)
            .return_once(|_| {
                Ok(DesignSales {
                    total_sales: 2,
                    total_revenue: 100_000,
                    recent_buyers: vec![BuyerRecord {
                        name: "Asha Rao".to_string(),
                        email: "asha@example.com".to_string(),
                        purchased_at: Timestamp::UNIX_EPOCH,
                    }],
                })
            });

        let response: DesignStatsResponse = TestClient::get(format!(
            "http://example.com/transactions/design/{design}/stats"
        ))
        .send(&admin_service(
            TestState {
                transactions,
                ..TestState::default()
            },
            Router::with_path("transactions/design/{design}/stats").get(handler),
        ))
        .await
        .take_json()
        .await?;

        assert_eq!(response.total_sales, 2);
        assert_eq!(response.total_revenue, 100_000);
        assert_eq!(response.recent_buyers.len(), 1);
        assert_eq!(response.recent_buyers[0].email, "asha@example.com");

        Ok(())
    }
}
