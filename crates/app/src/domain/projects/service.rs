//! Projects service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::error;

use crate::{
    domain::projects::{
        errors::ProjectsServiceError,
        models::{NewProject, ProjectRecord, ProjectUuid},
        repository::PgProjectsRepository,
    },
    media::{MediaStore, ResourceClass},
};

#[derive(Clone)]
pub struct PgProjectsService {
    repository: PgProjectsRepository,
    media: Arc<dyn MediaStore>,
}

impl PgProjectsService {
    #[must_use]
    pub fn new(pool: PgPool, media: Arc<dyn MediaStore>) -> Self {
        Self {
            repository: PgProjectsRepository::new(pool),
            media,
        }
    }
}

#[async_trait]
impl ProjectsService for PgProjectsService {
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, ProjectsServiceError> {
        Ok(self.repository.list().await?)
    }

    async fn top_projects(&self) -> Result<Vec<ProjectRecord>, ProjectsServiceError> {
        Ok(self.repository.top().await?)
    }

    async fn get_project(&self, project: ProjectUuid) -> Result<ProjectRecord, ProjectsServiceError> {
        Ok(self.repository.get(project).await?)
    }

    async fn create_project(
        &self,
        project: NewProject,
    ) -> Result<ProjectRecord, ProjectsServiceError> {
        Ok(self.repository.create(&project).await?)
    }

    async fn delete_project(&self, project: ProjectUuid) -> Result<(), ProjectsServiceError> {
        let record = self.repository.get(project).await?;

        for image in &record.images {
            if let Err(err) = self.media.destroy(&image.public_id, ResourceClass::Image).await {
                error!("failed to destroy gallery image {}: {err}", image.public_id);
            }
        }

        if let Some(model) = &record.model_3d {
            if let Err(err) = self.media.destroy(&model.public_id, ResourceClass::Raw).await {
                error!("failed to destroy 3D model {}: {err}", model.public_id);
            }
        }

        let rows_affected = self.repository.delete(project).await?;
        if rows_affected == 0 {
            return Err(ProjectsServiceError::NotFound);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProjectsService: Send + Sync {
    /// All projects, newest first.
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, ProjectsServiceError>;

    /// Up to five featured projects.
    async fn top_projects(&self) -> Result<Vec<ProjectRecord>, ProjectsServiceError>;

    /// Retrieve a single project.
    async fn get_project(&self, project: ProjectUuid)
    -> Result<ProjectRecord, ProjectsServiceError>;

    /// Insert a project whose assets are already stored.
    async fn create_project(
        &self,
        project: NewProject,
    ) -> Result<ProjectRecord, ProjectsServiceError>;

    /// Delete a project and its stored objects.
    async fn delete_project(&self, project: ProjectUuid) -> Result<(), ProjectsServiceError>;
}
