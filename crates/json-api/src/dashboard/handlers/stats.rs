//! Platform Stats Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use atelier_app::domain::dashboard::PlatformStats;

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlatformStatsResponse {
    pub projects: u64,

    pub designs: u64,

    pub users: u64,

    /// Completed sales count
    pub sales: u64,

    /// Revenue sum in minor currency units
    pub revenue: u64,
}

impl From<PlatformStats> for PlatformStatsResponse {
    fn from(stats: PlatformStats) -> Self {
        Self {
            projects: stats.projects,
            designs: stats.designs,
            users: stats.users,
            sales: stats.sales,
            revenue: stats.revenue,
        }
    }
}

/// Platform Stats Handler
///
/// Admin only. Platform-wide counts and completed-sale revenue.
#[endpoint(
    tags("dashboard"),
    summary = "Platform Stats",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PlatformStatsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stats = state
        .app
        .dashboard
        .stats()
        .await
        .or_500("failed to aggregate platform stats")?;

    Ok(Json(stats.into()))
}
