//! Create Design Handler

use std::sync::Arc;

use salvo::prelude::*;

use atelier_app::{
    domain::designs::{DesignCategory, DesignUuid, NewDesign},
    media::{ResourceClass, StoredAsset},
};

use crate::{
    designs::{errors::into_status_error, get::DesignResponse},
    extensions::*,
    state::State,
    uploads::{
        DOCUMENT_EXTENSIONS, IMAGE_EXTENSIONS, media_into_status_error, read_upload,
    },
};

/// Provider folder for design cover images.
const COVERS_FOLDER: &str = "designs/covers";

/// Provider folder for design documentation.
const DOCS_FOLDER: &str = "designs/docs";

/// Create Design Handler
///
/// Admin only. Multipart form: `title`, `description`, `category`,
/// `material`, `price` fields plus an `image` file and optional
/// `public_doc` / `private_doc` documentation files.
#[endpoint(
    tags("designs"),
    summary = "Create Design",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Design created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<DesignResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?.clone();

    let title = require_field(req, "title").await?;
    let description = require_field(req, "description").await?;
    let material = require_field(req, "material").await?;

    let category = require_field(req, "category").await.and_then(|value| {
        DesignCategory::parse(&value)
            .ok_or_else(|| StatusError::bad_request().brief("Unknown category"))
    })?;

    let price = req
        .form::<u64>("price")
        .await
        .ok_or_else(|| StatusError::bad_request().brief("A non-negative price is required"))?;

    let image = {
        let file = req
            .file("image")
            .await
            .ok_or_else(|| StatusError::bad_request().brief("A cover image is required"))?;

        read_upload(file, IMAGE_EXTENSIONS).await?
    };

    let public_doc = match req.file("public_doc").await {
        Some(file) => Some(read_upload(file, DOCUMENT_EXTENSIONS).await?),
        None => None,
    };

    let private_doc = match req.file("private_doc").await {
        Some(file) => Some(read_upload(file, DOCUMENT_EXTENSIONS).await?),
        None => None,
    };

    let image = state
        .app
        .media
        .upload(image, COVERS_FOLDER, ResourceClass::Image)
        .await
        .map_err(media_into_status_error)?;

    let public_doc = store_doc(&state, public_doc).await?;
    let private_doc = store_doc(&state, private_doc).await?;

    let design = state
        .app
        .designs
        .create_design(NewDesign {
            uuid: DesignUuid::new(),
            title,
            description,
            category,
            material,
            price,
            image,
            public_doc,
            private_doc,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(design.into()))
}

async fn require_field(req: &mut Request, name: &str) -> Result<String, StatusError> {
    req.form::<String>(name)
        .await
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| StatusError::bad_request().brief(format!("The {name} field is required")))
}

async fn store_doc(
    state: &Arc<State>,
    upload: Option<atelier_app::media::NewUpload>,
) -> Result<Option<StoredAsset>, StatusError> {
    match upload {
        Some(upload) => state
            .app
            .media
            .upload(upload, DOCS_FOLDER, ResourceClass::Raw)
            .await
            .map(Some)
            .map_err(media_into_status_error),
        None => Ok(None),
    }
}
