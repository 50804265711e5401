//! Downloads service.
//!
//! Serves a design's documentation, enforcing the entitlement invariant: a
//! private resource is downloadable iff the caller is an admin or has a
//! completed transaction for the design.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::error;

use crate::{
    auth::CurrentUser,
    domain::{
        designs::{DesignUuid, repository::PgDesignsRepository},
        downloads::{
            errors::DownloadsServiceError,
            models::{FileDownload, ResourceKind},
        },
        transactions::repository::PgTransactionsRepository,
    },
    media::{MediaStore, ResourceClass},
};

#[derive(Clone)]
pub struct PgDownloadsService {
    designs: PgDesignsRepository,
    transactions: PgTransactionsRepository,
    media: Arc<dyn MediaStore>,
}

impl PgDownloadsService {
    #[must_use]
    pub fn new(pool: PgPool, media: Arc<dyn MediaStore>) -> Self {
        Self {
            designs: PgDesignsRepository::new(pool.clone()),
            transactions: PgTransactionsRepository::new(pool),
            media,
        }
    }
}

#[async_trait]
impl DownloadsService for PgDownloadsService {
    async fn download(
        &self,
        design: DesignUuid,
        kind: ResourceKind,
        identity: Option<CurrentUser>,
    ) -> Result<FileDownload, DownloadsServiceError> {
        let record = self.designs.get(design).await?;

        let asset = match kind {
            ResourceKind::Public => record.public_doc,
            ResourceKind::Private => record.private_doc,
        }
        .ok_or(DownloadsServiceError::NotFound)?;

        if kind == ResourceKind::Private {
            let user = identity.ok_or(DownloadsServiceError::Unauthorized)?;

            if !user.role.is_admin()
                && !self.transactions.exists_completed(user.uuid, design).await?
            {
                return Err(DownloadsServiceError::Forbidden);
            }
        }

        let object = self
            .media
            .fetch(&asset, ResourceClass::Raw)
            .await
            .map_err(|err| {
                // Sanitized: the caller only ever sees "not found".
                error!("failed to retrieve stored object {}: {err}", asset.public_id);

                DownloadsServiceError::NotFound
            })?;

        Ok(FileDownload {
            filename: attachment_filename(&asset.public_id, &object.content_type),
            bytes: object.bytes,
            content_type: object.content_type,
        })
    }
}

#[automock]
#[async_trait]
pub trait DownloadsService: Send + Sync {
    /// Retrieve a design resource for streaming back as an attachment.
    async fn download(
        &self,
        design: DesignUuid,
        kind: ResourceKind,
        identity: Option<CurrentUser>,
    ) -> Result<FileDownload, DownloadsServiceError>;
}

/// Best-effort filename from the stored object id, falling back to an
/// extension implied by the content type.
fn attachment_filename(public_id: &str, content_type: &str) -> String {
    let stem = public_id.rsplit('/').next().unwrap_or(public_id);

    if stem.contains('.') {
        return stem.to_string();
    }

    let extension = match content_type {
        "application/pdf" => Some("pdf"),
        "application/msword" => Some("doc"),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => Some("docx"),
        _ => None,
    };

    match extension {
        Some(extension) => format!("{stem}.{extension}"),
        None => stem.to_string(),
    }
}
