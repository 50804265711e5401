//! Dashboard Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{PgPool, Row, query};
use uuid::Uuid;

use crate::domain::dashboard::models::PlatformStats;

const PLATFORM_TOTALS_SQL: &str = include_str!("sql/platform_totals.sql");
const RECENT_DESIGNS_SQL: &str = include_str!("sql/recent_designs.sql");
const RECENT_PROJECTS_SQL: &str = include_str!("sql/recent_projects.sql");

/// Newest design rows, reduced to what the feed needs.
#[derive(Debug, Clone)]
pub(crate) struct RecentDesignRow {
    pub uuid: Uuid,
    pub title: String,
    pub image_url: String,
    pub created_at: Timestamp,
}

/// Newest project rows, reduced to what the feed needs.
#[derive(Debug, Clone)]
pub(crate) struct RecentProjectRow {
    pub uuid: Uuid,
    pub title: String,
    pub status: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub(crate) struct PgDashboardRepository {
    pool: PgPool,
}

impl PgDashboardRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn totals(&self) -> Result<PlatformStats, sqlx::Error> {
        let row = query(PLATFORM_TOTALS_SQL).fetch_one(&self.pool).await?;

        let projects: i64 = row.try_get("projects")?;
        let designs: i64 = row.try_get("designs")?;
        let users: i64 = row.try_get("users")?;
        let sales: i64 = row.try_get("sales")?;
        let revenue: i64 = row.try_get("revenue")?;

        Ok(PlatformStats {
            projects: u64::try_from(projects).unwrap_or(0),
            designs: u64::try_from(designs).unwrap_or(0),
            users: u64::try_from(users).unwrap_or(0),
            sales: u64::try_from(sales).unwrap_or(0),
            revenue: u64::try_from(revenue).unwrap_or(0),
        })
    }

    pub(crate) async fn recent_designs(
        &self,
        limit: i64,
    ) -> Result<Vec<RecentDesignRow>, sqlx::Error> {
        let rows = query(RECENT_DESIGNS_SQL)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                Ok(RecentDesignRow {
                    uuid: row.try_get("uuid")?,
                    title: row.try_get("title")?,
                    image_url: row.try_get("image_url")?,
                    created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
                })
            })
            .collect()
    }

    pub(crate) async fn recent_projects(
        &self,
        limit: i64,
    ) -> Result<Vec<RecentProjectRow>, sqlx::Error> {
        let rows = query(RECENT_PROJECTS_SQL)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                Ok(RecentProjectRow {
                    uuid: row.try_get("uuid")?,
                    title: row.try_get("title")?,
                    status: row.try_get("status")?,
                    created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
                })
            })
            .collect()
    }
}
