//! Delete Project Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, projects::errors::into_status_error, state::State};

/// Delete Project Handler
///
/// Admin only. Removes the project row and destroys its stored objects.
#[endpoint(
    tags("projects"),
    summary = "Delete Project",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Project deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Project not found"),
    ),
)]
pub(crate) async fn handler(
    project: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .projects
        .delete_project(project.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}
