//! Project Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*, projects::errors::into_status_error, projects::get::ProjectResponse,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProjectsResponse {
    /// The list of projects, newest first
    pub projects: Vec<ProjectResponse>,
}

/// Project Index Handler
///
/// Returns all portfolio projects, newest first.
#[endpoint(tags("projects"), summary = "List Projects")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProjectsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let projects = state
        .app
        .projects
        .list_projects()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProjectsResponse {
        projects: projects.into_iter().map(Into::into).collect(),
    }))
}
