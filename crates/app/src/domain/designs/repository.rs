//! Designs Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Row, postgres::PgRow, query, query_as};

use crate::{
    domain::{
        designs::models::{DesignCategory, DesignFilter, DesignRecord, DesignUuid, NewDesign},
        paging::Page,
    },
    media::StoredAsset,
};

const GET_DESIGN_SQL: &str = include_str!("sql/get_design.sql");
const CREATE_DESIGN_SQL: &str = include_str!("sql/create_design.sql");
const DELETE_DESIGN_SQL: &str = include_str!("sql/delete_design.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgDesignsRepository {
    pool: PgPool,
}

impl PgDesignsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One filtered page plus the total match count.
    pub(crate) async fn list(
        &self,
        filter: &DesignFilter,
        page: Page,
    ) -> Result<(Vec<DesignRecord>, u64), sqlx::Error> {
        let mut count_query: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM designs");
        push_filters(&mut count_query, filter);

        let total: i64 = count_query.build_query_scalar().fetch_one(&self.pool).await?;

        let mut page_query: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT * FROM designs");
        push_filters(&mut page_query, filter);
        page_query
            .push(" ORDER BY created_at DESC, uuid DESC LIMIT ")
            .push_bind(i64::from(page.limit()))
            .push(" OFFSET ")
            .push_bind(page.offset());

        let designs = page_query
            .build_query_as::<DesignRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok((designs, u64::try_from(total).unwrap_or(0)))
    }

    pub(crate) async fn get(&self, design: DesignUuid) -> Result<DesignRecord, sqlx::Error> {
        query_as::<Postgres, DesignRecord>(GET_DESIGN_SQL)
            .bind(design.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn create(&self, design: &NewDesign) -> Result<DesignRecord, sqlx::Error> {
        let price = i64::try_from(design.price).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        query_as::<Postgres, DesignRecord>(CREATE_DESIGN_SQL)
            .bind(design.uuid.into_uuid())
            .bind(&design.title)
            .bind(&design.description)
            .bind(design.category.as_str())
            .bind(&design.material)
            .bind(price)
            .bind(&design.image.url)
            .bind(&design.image.public_id)
            .bind(design.public_doc.as_ref().map(|asset| asset.url.as_str()))
            .bind(design.public_doc.as_ref().map(|asset| asset.public_id.as_str()))
            .bind(design.private_doc.as_ref().map(|asset| asset.url.as_str()))
            .bind(design.private_doc.as_ref().map(|asset| asset.public_id.as_str()))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn delete(&self, design: DesignUuid) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_DESIGN_SQL)
            .bind(design.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &DesignFilter) {
    builder.push(" WHERE TRUE");

    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    if let Some(category) = filter.category {
        builder.push(" AND category = ").push_bind(category.as_str());
    }

    if let Some(material) = filter.material.as_deref().filter(|m| !m.trim().is_empty()) {
        builder
            .push(" AND material ILIKE ")
            .push_bind(format!("%{}%", material.trim()));
    }

    if let Some(min_price) = filter.min_price {
        builder
            .push(" AND price >= ")
            .push_bind(i64::try_from(min_price).unwrap_or(i64::MAX));
    }

    if let Some(max_price) = filter.max_price {
        builder
            .push(" AND price <= ")
            .push_bind(i64::try_from(max_price).unwrap_or(i64::MAX));
    }
}

impl<'r> FromRow<'r, PgRow> for DesignRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("price")?;

        let price = u64::try_from(price_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "price".to_string(),
            source: Box::new(e),
        })?;

        let category_text: String = row.try_get("category")?;
        let category =
            DesignCategory::parse(&category_text).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "category".to_string(),
                source: format!("unknown category '{category_text}'").into(),
            })?;

        Ok(Self {
            uuid: DesignUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            category,
            material: row.try_get("material")?,
            price,
            image: StoredAsset {
                url: row.try_get("image_url")?,
                public_id: row.try_get("image_id")?,
            },
            public_doc: stored_asset_pair(row, "public_doc_url", "public_doc_id")?,
            private_doc: stored_asset_pair(row, "private_doc_url", "private_doc_id")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn stored_asset_pair(
    row: &PgRow,
    url_column: &str,
    id_column: &str,
) -> sqlx::Result<Option<StoredAsset>> {
    let url: Option<String> = row.try_get(url_column)?;
    let public_id: Option<String> = row.try_get(id_column)?;

    Ok(match (url, public_id) {
        (Some(url), Some(public_id)) => Some(StoredAsset { url, public_id }),
        _ => None,
    })
}
