//! Design Download Handler

use std::sync::Arc;

use salvo::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    oapi::extract::PathParam,
    prelude::*,
};
use uuid::Uuid;

use atelier_app::domain::downloads::{DownloadsServiceError, ResourceKind};

use crate::{extensions::*, state::State};
use tracing::error;

/// Design Download Handler
///
/// Streams a design's documentation as an attachment. `type` selects the
/// `public` or `private` resource; private downloads require an identity
/// (bearer header or `?token=`) entitled to the design.
#[endpoint(
    tags("designs"),
    summary = "Download Design Documentation",
    responses(
        (status_code = StatusCode::OK, description = "File bytes"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Identity required"),
        (status_code = StatusCode::FORBIDDEN, description = "Purchase required"),
        (status_code = StatusCode::NOT_FOUND, description = "No such file"),
    ),
)]
pub(crate) async fn handler(
    design: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.current_user().cloned();

    let kind = req
        .query::<String>("type")
        .as_deref()
        .and_then(ResourceKind::parse)
        .ok_or_else(|| StatusError::bad_request().brief("type must be public or private"))?;

    let file = state
        .app
        .downloads
        .download(design.into_inner().into(), kind, identity)
        .await
        .map_err(download_into_status_error)?;

    res.add_header(
        CONTENT_DISPOSITION,
        format!("attachment; filename=\"{}\"", file.filename),
        true,
    )
    .or_500("failed to set content-disposition header")?
    .add_header(CONTENT_TYPE, file.content_type, true)
    .or_500("failed to set content-type header")?
    .write_body(file.bytes)
    .or_500("failed to write download body")?;

    Ok(())
}

fn download_into_status_error(error: DownloadsServiceError) -> StatusError {
    match error {
        DownloadsServiceError::NotFound => StatusError::not_found().brief("File not found"),
        DownloadsServiceError::Unauthorized => {
            StatusError::unauthorized().brief("Authentication required")
        }
        DownloadsServiceError::Forbidden => StatusError::forbidden().brief("Purchase required"),
        DownloadsServiceError::Sql(source) => {
            error!("downloads storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
