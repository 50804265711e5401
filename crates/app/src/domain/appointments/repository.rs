//! Appointments Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    auth::UserUuid,
    domain::appointments::models::{
        AppointmentMode, AppointmentRecord, AppointmentStatus, AppointmentUuid, BookAppointment,
    },
};

const CREATE_APPOINTMENT_SQL: &str = include_str!("sql/create_appointment.sql");
const GET_APPOINTMENT_SQL: &str = include_str!("sql/get_appointment.sql");
const LIST_APPOINTMENTS_SQL: &str = include_str!("sql/list_appointments.sql");
const LIST_APPOINTMENTS_FOR_USER_SQL: &str = include_str!("sql/list_appointments_for_user.sql");
const UPDATE_APPOINTMENT_SQL: &str = include_str!("sql/update_appointment.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAppointmentsRepository {
    pool: PgPool,
}

impl PgAppointmentsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create(
        &self,
        uuid: AppointmentUuid,
        user: UserUuid,
        booking: &BookAppointment,
    ) -> Result<AppointmentRecord, sqlx::Error> {
        query_as::<Postgres, AppointmentRecord>(CREATE_APPOINTMENT_SQL)
            .bind(uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(&booking.name)
            .bind(&booking.email)
            .bind(SqlxTimestamp::from(booking.date))
            .bind(&booking.time_slot)
            .bind(booking.mode.as_str())
            .bind(&booking.purpose)
            .bind(booking.remarks.as_deref())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn get(
        &self,
        appointment: AppointmentUuid,
    ) -> Result<AppointmentRecord, sqlx::Error> {
        query_as::<Postgres, AppointmentRecord>(GET_APPOINTMENT_SQL)
            .bind(appointment.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn list(&self) -> Result<Vec<AppointmentRecord>, sqlx::Error> {
        query_as::<Postgres, AppointmentRecord>(LIST_APPOINTMENTS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn list_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<AppointmentRecord>, sqlx::Error> {
        query_as::<Postgres, AppointmentRecord>(LIST_APPOINTMENTS_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&self.pool)
            .await
    }

    /// Stamp a new status and attach reply/link, leaving absent fields alone.
    pub(crate) async fn update(
        &self,
        appointment: AppointmentUuid,
        status: AppointmentStatus,
        admin_reply: Option<&str>,
        meeting_link: Option<&str>,
    ) -> Result<AppointmentRecord, sqlx::Error> {
        query_as::<Postgres, AppointmentRecord>(UPDATE_APPOINTMENT_SQL)
            .bind(appointment.into_uuid())
            .bind(status.as_str())
            .bind(admin_reply)
            .bind(meeting_link)
            .fetch_one(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AppointmentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status_text: String = row.try_get("status")?;
        let status =
            AppointmentStatus::parse(&status_text).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: format!("unknown status '{status_text}'").into(),
            })?;

        let mode_text: String = row.try_get("mode")?;
        let mode = AppointmentMode::parse(&mode_text).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "mode".to_string(),
            source: format!("unknown mode '{mode_text}'").into(),
        })?;

        Ok(Self {
            uuid: AppointmentUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            date: row.try_get::<SqlxTimestamp, _>("date")?.to_jiff(),
            time_slot: row.try_get("time_slot")?,
            mode,
            purpose: row.try_get("purpose")?,
            remarks: row.try_get("remarks")?,
            status,
            admin_reply: row.try_get("admin_reply")?,
            meeting_link: row.try_get("meeting_link")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
