//! Projects Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    domain::projects::models::{
        NewProject, ProjectEstimates, ProjectRecord, ProjectStatus, ProjectUuid,
    },
    media::StoredAsset,
};

const LIST_PROJECTS_SQL: &str = include_str!("sql/list_projects.sql");
const TOP_PROJECTS_SQL: &str = include_str!("sql/top_projects.sql");
const GET_PROJECT_SQL: &str = include_str!("sql/get_project.sql");
const CREATE_PROJECT_SQL: &str = include_str!("sql/create_project.sql");
const DELETE_PROJECT_SQL: &str = include_str!("sql/delete_project.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgProjectsRepository {
    pool: PgPool,
}

impl PgProjectsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn list(&self) -> Result<Vec<ProjectRecord>, sqlx::Error> {
        query_as::<Postgres, ProjectRecord>(LIST_PROJECTS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn top(&self) -> Result<Vec<ProjectRecord>, sqlx::Error> {
        query_as::<Postgres, ProjectRecord>(TOP_PROJECTS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn get(&self, project: ProjectUuid) -> Result<ProjectRecord, sqlx::Error> {
        query_as::<Postgres, ProjectRecord>(GET_PROJECT_SQL)
            .bind(project.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn create(&self, project: &NewProject) -> Result<ProjectRecord, sqlx::Error> {
        let images = serde_json::to_value(&project.images).map_err(|e| {
            sqlx::Error::ColumnDecode {
                index: "images".to_string(),
                source: Box::new(e),
            }
        })?;

        query_as::<Postgres, ProjectRecord>(CREATE_PROJECT_SQL)
            .bind(project.uuid.into_uuid())
            .bind(&project.title)
            .bind(&project.description)
            .bind(&project.location)
            .bind(project.status.as_str())
            .bind(&project.estimates.cost)
            .bind(&project.estimates.duration)
            .bind(&project.estimates.area)
            .bind(images)
            .bind(project.model_3d.as_ref().map(|asset| asset.url.as_str()))
            .bind(project.model_3d.as_ref().map(|asset| asset.public_id.as_str()))
            .bind(project.model_embed_url.as_deref())
            .bind(project.is_featured)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn delete(&self, project: ProjectUuid) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PROJECT_SQL)
            .bind(project.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProjectRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status_text: String = row.try_get("status")?;
        let status =
            ProjectStatus::parse(&status_text).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: format!("unknown status '{status_text}'").into(),
            })?;

        let images_json: JsonValue = row.try_get("images")?;
        let images: Vec<StoredAsset> =
            serde_json::from_value(images_json).map_err(|e| sqlx::Error::ColumnDecode {
                index: "images".to_string(),
                source: Box::new(e),
            })?;

        let model_url: Option<String> = row.try_get("model_url")?;
        let model_id: Option<String> = row.try_get("model_id")?;
        let model_3d = match (model_url, model_id) {
            (Some(url), Some(public_id)) => Some(StoredAsset { url, public_id }),
            _ => None,
        };

        Ok(Self {
            uuid: ProjectUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            location: row.try_get("location")?,
            status,
            estimates: ProjectEstimates {
                cost: row.try_get("estimated_cost")?,
                duration: row.try_get("estimated_duration")?,
                area: row.try_get("estimated_area")?,
            },
            images,
            model_3d,
            model_embed_url: row.try_get("model_embed_url")?,
            is_featured: row.try_get("is_featured")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
