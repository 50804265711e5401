//! Top Projects Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    projects::{errors::into_status_error, index::ProjectsResponse},
    state::State,
};

/// Top Projects Handler
///
/// Returns the featured projects shown on the landing page.
#[endpoint(tags("projects"), summary = "Top Projects")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProjectsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let projects = state
        .app
        .projects
        .top_projects()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProjectsResponse {
        projects: projects.into_iter().map(Into::into).collect(),
    }))
}
