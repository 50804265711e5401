//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::auth::models::{OtpRecord, UserRecord, UserRole, UserUuid};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const FIND_USER_BY_EMAIL_SQL: &str = include_str!("sql/find_user_by_email.sql");
const FIND_USER_BY_UUID_SQL: &str = include_str!("sql/find_user_by_uuid.sql");
const UPDATE_USER_PASSWORD_SQL: &str = include_str!("sql/update_user_password.sql");
const SET_USER_ROLE_SQL: &str = include_str!("sql/set_user_role.sql");
const CREATE_OTP_SQL: &str = include_str!("sql/create_otp.sql");
const LATEST_OTP_SQL: &str = include_str!("sql/latest_otp.sql");
const DELETE_OTPS_FOR_EMAIL_SQL: &str = include_str!("sql/delete_otps_for_email.sql");
const DELETE_OTP_SQL: &str = include_str!("sql/delete_otp.sql");

/// User insertion payload (password already hashed).
#[derive(Debug, Clone)]
pub(crate) struct NewUserRecord {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub organization: String,
    pub password_hash: String,
    pub role: UserRole,
}

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_user(&self, user: &NewUserRecord) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(&user.organization)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn find_by_uuid(&self, user: UserUuid) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(FIND_USER_BY_UUID_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_USER_PASSWORD_SQL)
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn set_role(
        &self,
        email: &str,
        role: UserRole,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(SET_USER_ROLE_SQL)
            .bind(email)
            .bind(role.as_str())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn create_otp(
        &self,
        uuid: Uuid,
        email: &str,
        code: &str,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_OTP_SQL)
            .bind(uuid)
            .bind(email)
            .bind(code)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn latest_otp(&self, email: &str) -> Result<Option<OtpRecord>, sqlx::Error> {
        query_as::<Postgres, OtpRecord>(LATEST_OTP_SQL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn delete_otps_for(&self, email: &str) -> Result<(), sqlx::Error> {
        query(DELETE_OTPS_FOR_EMAIL_SQL)
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_otp(&self, uuid: Uuid) -> Result<(), sqlx::Error> {
        query(DELETE_OTP_SQL).bind(uuid).execute(&self.pool).await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role_text: String = row.try_get("role")?;

        let role = UserRole::parse(&role_text).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: format!("unknown role '{role_text}'").into(),
        })?;

        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            organization: row.try_get("organization")?,
            password_hash: row.try_get("password_hash")?,
            role,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OtpRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            email: row.try_get("email")?,
            code: row.try_get("code")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
