//! Recent Updates Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use atelier_app::domain::dashboard::ActivityItem;

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ActivityResponse {
    /// `design` or `project`
    pub kind: String,

    /// The entity the entry refers to
    pub uuid: Uuid,

    pub title: String,

    /// Display message shown in the feed
    pub message: String,

    /// Thumbnail for design entries
    pub image_url: Option<String>,

    pub created_at: String,
}

impl From<ActivityItem> for ActivityResponse {
    fn from(item: ActivityItem) -> Self {
        Self {
            kind: item.kind.as_str().to_string(),
            uuid: item.uuid,
            title: item.title,
            message: item.message,
            image_url: item.image_url,
            created_at: item.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatesResponse {
    /// Recent catalogue and portfolio activity, newest first
    pub updates: Vec<ActivityResponse>,
}

/// Recent Updates Handler
///
/// The merged recent-activity feed. This is a deliberate pull endpoint;
/// clients poll it on an interval.
#[endpoint(
    tags("dashboard"),
    summary = "Recent Updates",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UpdatesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let updates = state
        .app
        .dashboard
        .updates()
        .await
        .or_500("failed to build the updates feed")?;

    Ok(Json(UpdatesResponse {
        updates: updates.into_iter().map(Into::into).collect(),
    }))
}
