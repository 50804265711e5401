//! Create Project Handler

use std::sync::Arc;

use salvo::prelude::*;

use atelier_app::{
    domain::projects::{NewProject, ProjectEstimates, ProjectStatus, ProjectUuid},
    media::{ResourceClass, StoredAsset},
};

use crate::{
    extensions::*,
    projects::{errors::into_status_error, get::ProjectResponse},
    state::State,
    uploads::{IMAGE_EXTENSIONS, MODEL_EXTENSIONS, media_into_status_error, read_upload},
};

/// Provider folder for project gallery images.
const GALLERY_FOLDER: &str = "projects/gallery";

/// Provider folder for project 3D models.
const MODELS_FOLDER: &str = "projects/models";

/// Create Project Handler
///
/// Admin only. Multipart form: `title`, `description`, `location` fields
/// with optional `status`, estimate, `model_embed_url`, and `is_featured`
/// fields, plus one or more `images` files and an optional `model_3d` file.
#[endpoint(
    tags("projects"),
    summary = "Create Project",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Project created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProjectResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?.clone();

    let title = require_field(req, "title").await?;
    let description = require_field(req, "description").await?;
    let location = require_field(req, "location").await?;

    let status = match req.form::<String>("status").await {
        Some(value) => ProjectStatus::parse(&value)
            .ok_or_else(|| StatusError::bad_request().brief("Unknown project status"))?,
        None => ProjectStatus::Ongoing,
    };

    let mut estimates = ProjectEstimates::default();
    if let Some(cost) = req.form::<String>("estimated_cost").await {
        estimates.cost = cost;
    }
    if let Some(duration) = req.form::<String>("estimated_duration").await {
        estimates.duration = duration;
    }
    if let Some(area) = req.form::<String>("estimated_area").await {
        estimates.area = area;
    }

    let model_embed_url = req.form::<String>("model_embed_url").await;
    let is_featured = req.form::<bool>("is_featured").await.unwrap_or(false);

    let mut gallery = Vec::new();
    {
        let files = req
            .files("images")
            .await
            .filter(|files| !files.is_empty())
            .ok_or_else(|| {
                StatusError::bad_request().brief("At least one gallery image is required")
            })?;

        for file in files {
            gallery.push(read_upload(file, IMAGE_EXTENSIONS).await?);
        }
    }

    let model_upload = match req.file("model_3d").await {
        Some(file) => Some(read_upload(file, MODEL_EXTENSIONS).await?),
        None => None,
    };

    let mut images: Vec<StoredAsset> = Vec::with_capacity(gallery.len());
    for upload in gallery {
        images.push(
            state
                .app
                .media
                .upload(upload, GALLERY_FOLDER, ResourceClass::Image)
                .await
                .map_err(media_into_status_error)?,
        );
    }

    let model_3d = match model_upload {
        Some(upload) => Some(
            state
                .app
                .media
                .upload(upload, MODELS_FOLDER, ResourceClass::Raw)
                .await
                .map_err(media_into_status_error)?,
        ),
        None => None,
    };

    let project = state
        .app
        .projects
        .create_project(NewProject {
            uuid: ProjectUuid::new(),
            title,
            description,
            location,
            status,
            estimates,
            images,
            model_3d,
            model_embed_url,
            is_featured,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(project.into()))
}

async fn require_field(req: &mut Request, name: &str) -> Result<String, StatusError> {
    req.form::<String>(name)
        .await
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| StatusError::bad_request().brief(format!("The {name} field is required")))
}
