//! Transactions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Row, postgres::PgRow, query, query_as};

use crate::{
    auth::UserUuid,
    domain::{
        designs::DesignUuid,
        paging::Page,
        transactions::models::{
            BuyerRecord, NewTransaction, SaleRecord, TransactionRecord, TransactionStatus,
            TransactionUuid,
        },
    },
};

const DESIGN_FOR_ORDER_SQL: &str = include_str!("sql/design_for_order.sql");
const CREATE_TRANSACTION_SQL: &str = include_str!("sql/create_transaction.sql");
const COMPLETE_TRANSACTION_SQL: &str = include_str!("sql/complete_transaction.sql");
const FIND_BY_ORDER_ID_SQL: &str = include_str!("sql/find_by_order_id.sql");
const EXISTS_COMPLETED_SQL: &str = include_str!("sql/exists_completed.sql");
const LIST_FOR_USER_SQL: &str = include_str!("sql/list_for_user.sql");
const DESIGN_TOTALS_SQL: &str = include_str!("sql/design_totals.sql");
const RECENT_BUYERS_SQL: &str = include_str!("sql/recent_buyers.sql");

/// Bound on the buyers list returned with per-design stats.
pub(crate) const RECENT_BUYERS_LIMIT: i64 = 10;

#[derive(Debug, Clone)]
pub(crate) struct PgTransactionsRepository {
    pool: PgPool,
}

impl PgTransactionsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Title/price snapshot source for order creation.
    pub(crate) async fn design_for_order(
        &self,
        design: DesignUuid,
    ) -> Result<Option<(String, u64)>, sqlx::Error> {
        let row = query(DESIGN_FOR_ORDER_SQL)
            .bind(design.into_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| {
            let title: String = row.try_get("title")?;
            let price_i64: i64 = row.try_get("price")?;

            let price = u64::try_from(price_i64).map_err(|e| sqlx::Error::ColumnDecode {
                index: "price".to_string(),
                source: Box::new(e),
            })?;

            Ok((title, price))
        })
        .transpose()
    }

    pub(crate) async fn create(
        &self,
        transaction: &NewTransaction,
    ) -> Result<TransactionRecord, sqlx::Error> {
        let amount = i64::try_from(transaction.amount).map_err(|e| sqlx::Error::ColumnDecode {
            index: "amount".to_string(),
            source: Box::new(e),
        })?;

        query_as::<Postgres, TransactionRecord>(CREATE_TRANSACTION_SQL)
            .bind(transaction.uuid.into_uuid())
            .bind(transaction.user_uuid.into_uuid())
            .bind(transaction.design_uuid.map(DesignUuid::into_uuid))
            .bind(&transaction.design_title)
            .bind(amount)
            .bind(&transaction.currency)
            .bind(&transaction.order_id)
            .fetch_one(&self.pool)
            .await
    }

    /// Flip a `pending` transaction to `completed`, stamping settlement data.
    ///
    /// Returns `None` when no pending transaction uses `order_id` — either it
    /// was already completed (idempotent replay) or it never existed.
    pub(crate) async fn complete(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<Option<TransactionRecord>, sqlx::Error> {
        query_as::<Postgres, TransactionRecord>(COMPLETE_TRANSACTION_SQL)
            .bind(order_id)
            .bind(payment_id)
            .bind(signature)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<TransactionRecord>, sqlx::Error> {
        query_as::<Postgres, TransactionRecord>(FIND_BY_ORDER_ID_SQL)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn exists_completed(
        &self,
        user: UserUuid,
        design: DesignUuid,
    ) -> Result<bool, sqlx::Error> {
        query_as::<Postgres, (bool,)>(EXISTS_COMPLETED_SQL)
            .bind(user.into_uuid())
            .bind(design.into_uuid())
            .fetch_one(&self.pool)
            .await
            .map(|(exists,)| exists)
    }

    pub(crate) async fn list_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<TransactionRecord>, sqlx::Error> {
        query_as::<Postgres, TransactionRecord>(LIST_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&self.pool)
            .await
    }

    /// One page of completed sales plus the total match count.
    pub(crate) async fn sales(
        &self,
        search: Option<&str>,
        page: Page,
    ) -> Result<(Vec<SaleRecord>, u64), sqlx::Error> {
        let mut count_query: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "SELECT COUNT(*) FROM transactions t JOIN users u ON u.uuid = t.user_uuid",
        );
        push_sales_filters(&mut count_query, search);

        let total: i64 = count_query.build_query_scalar().fetch_one(&self.pool).await?;

        let mut page_query: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "SELECT t.*, u.name AS buyer_name, u.email AS buyer_email \
             FROM transactions t JOIN users u ON u.uuid = t.user_uuid",
        );
        push_sales_filters(&mut page_query, search);
        page_query
            .push(" ORDER BY t.created_at DESC, t.uuid DESC LIMIT ")
            .push_bind(i64::from(page.limit()))
            .push(" OFFSET ")
            .push_bind(page.offset());

        let sales = page_query
            .build_query_as::<SaleRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok((sales, u64::try_from(total).unwrap_or(0)))
    }

    /// Completed count and revenue sum for one design.
    pub(crate) async fn design_totals(
        &self,
        design: DesignUuid,
    ) -> Result<(u64, u64), sqlx::Error> {
        let row = query(DESIGN_TOTALS_SQL)
            .bind(design.into_uuid())
            .fetch_one(&self.pool)
            .await?;

        let total_sales: i64 = row.try_get("total_sales")?;
        let total_revenue: i64 = row.try_get("total_revenue")?;

        Ok((
            u64::try_from(total_sales).unwrap_or(0),
            u64::try_from(total_revenue).unwrap_or(0),
        ))
    }

    pub(crate) async fn recent_buyers(
        &self,
        design: DesignUuid,
    ) -> Result<Vec<BuyerRecord>, sqlx::Error> {
        let rows = query(RECENT_BUYERS_SQL)
            .bind(design.into_uuid())
            .bind(RECENT_BUYERS_LIMIT)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                Ok(BuyerRecord {
                    name: row.try_get("name")?,
                    email: row.try_get("email")?,
                    purchased_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
                })
            })
            .collect()
    }
}

fn push_sales_filters(builder: &mut QueryBuilder<'_, Postgres>, search: Option<&str>) {
    builder.push(" WHERE t.status = 'completed'");

    if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        builder
            .push(" AND (t.design_title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR t.payment_id ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

impl<'r> FromRow<'r, PgRow> for TransactionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let amount_i64: i64 = row.try_get("amount")?;

        let amount = u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "amount".to_string(),
            source: Box::new(e),
        })?;

        let status_text: String = row.try_get("status")?;
        let status =
            TransactionStatus::parse(&status_text).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: format!("unknown status '{status_text}'").into(),
            })?;

        Ok(Self {
            uuid: TransactionUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            design_uuid: row
                .try_get::<Option<uuid::Uuid>, _>("design_uuid")?
                .map(DesignUuid::from_uuid),
            design_title: row.try_get("design_title")?,
            amount,
            currency: row.try_get("currency")?,
            order_id: row.try_get("order_id")?,
            payment_id: row.try_get("payment_id")?,
            signature: row.try_get("signature")?,
            status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SaleRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            transaction: TransactionRecord::from_row(row)?,
            buyer_name: row.try_get("buyer_name")?,
            buyer_email: row.try_get("buyer_email")?,
        })
    }
}
