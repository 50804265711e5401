//! Multipart upload helpers.
//!
//! Uploaded files are restricted to small per-purpose extension allow-lists
//! before anything is sent to the file-hosting provider.

use salvo::{http::form::FilePart, prelude::*};
use tracing::error;

use atelier_app::media::{MediaStoreError, NewUpload};

use crate::extensions::*;

/// Cover and gallery images.
pub(crate) const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Design documentation.
pub(crate) const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// 3D model assets.
pub(crate) const MODEL_EXTENSIONS: &[&str] = &["glb", "gltf"];

/// Read an uploaded part into an upload payload, enforcing `allowed`
/// extensions.
pub(crate) async fn read_upload(
    file: &FilePart,
    allowed: &[&str],
) -> Result<NewUpload, StatusError> {
    let filename = file.name().unwrap_or("upload").to_string();

    if !has_allowed_extension(&filename, allowed) {
        return Err(StatusError::bad_request().brief(format!(
            "File type not allowed; expected one of: {}",
            allowed.join(", ")
        )));
    }

    let bytes = tokio::fs::read(file.path())
        .await
        .or_500("failed to read uploaded file")?;

    Ok(NewUpload { bytes, filename })
}

/// Provider failures surface as a plain 500; the details stay in the logs.
pub(crate) fn media_into_status_error(error: MediaStoreError) -> StatusError {
    error!("media store request failed: {error}");

    StatusError::internal_server_error()
}

fn has_allowed_extension(filename: &str, allowed: &[&str]) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_stem, extension)| extension.to_ascii_lowercase())
        .is_some_and(|extension| allowed.contains(&extension.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_match_case_insensitively() {
        assert!(has_allowed_extension("plan.PDF", DOCUMENT_EXTENSIONS));
        assert!(has_allowed_extension("cover.jpeg", IMAGE_EXTENSIONS));
        assert!(has_allowed_extension("model.glb", MODEL_EXTENSIONS));
    }

    #[test]
    fn wrong_or_missing_extensions_are_rejected() {
        assert!(!has_allowed_extension("plan.exe", DOCUMENT_EXTENSIONS));
        assert!(!has_allowed_extension("plan", DOCUMENT_EXTENSIONS));
        assert!(!has_allowed_extension("cover.gif", IMAGE_EXTENSIONS));
    }
}
