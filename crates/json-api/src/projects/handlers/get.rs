//! Get Project Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use atelier_app::domain::projects::ProjectRecord;

use crate::{extensions::*, projects::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProjectResponse {
    /// The unique identifier of the project
    pub uuid: Uuid,

    pub title: String,

    pub description: String,

    pub location: String,

    /// `Proposed`, `Ongoing`, or `Completed`
    pub status: String,

    pub estimated_cost: String,

    pub estimated_duration: String,

    pub estimated_area: String,

    /// Gallery image URLs
    pub images: Vec<String>,

    /// 3D model URL, when one is attached
    pub model_url: Option<String>,

    /// Third-party viewer embed URL
    pub model_embed_url: Option<String>,

    pub is_featured: bool,

    /// The date and time the project was created
    pub created_at: String,

    /// The date and time the project was last updated
    pub updated_at: String,
}

impl From<ProjectRecord> for ProjectResponse {
    fn from(project: ProjectRecord) -> Self {
        Self {
            uuid: project.uuid.into(),
            title: project.title,
            description: project.description,
            location: project.location,
            status: project.status.as_str().to_string(),
            estimated_cost: project.estimates.cost,
            estimated_duration: project.estimates.duration,
            estimated_area: project.estimates.area,
            images: project.images.into_iter().map(|image| image.url).collect(),
            model_url: project.model_3d.map(|model| model.url),
            model_embed_url: project.model_embed_url,
            is_featured: project.is_featured,
            created_at: project.created_at.to_string(),
            updated_at: project.updated_at.to_string(),
        }
    }
}

/// Get Project Handler
///
/// Returns a project.
#[endpoint(tags("projects"), summary = "Get Project")]
pub(crate) async fn handler(
    project: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProjectResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let project = state
        .app
        .projects
        .get_project(project.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(project.into()))
}
