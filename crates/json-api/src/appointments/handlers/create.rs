//! Book Appointment Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use atelier_app::domain::appointments::{
    AppointmentMode, AppointmentRecord, BookAppointment,
};

use crate::{appointments::errors::into_status_error, extensions::*, state::State};

/// Book Appointment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookAppointmentRequest {
    pub name: String,

    pub email: String,

    /// Appointment date (RFC 3339 timestamp)
    pub date: String,

    /// Display label for the slot, e.g. `10:00 AM`
    pub time_slot: String,

    /// `Video Call`, `Voice Call`, or `In-Person`
    pub mode: String,

    pub purpose: String,

    pub remarks: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppointmentResponse {
    /// The unique identifier of the appointment
    pub uuid: Uuid,

    pub name: String,

    pub email: String,

    pub date: String,

    pub time_slot: String,

    pub mode: String,

    pub purpose: String,

    pub remarks: Option<String>,

    /// `pending`, `confirmed`, `completed`, or `cancelled`
    pub status: String,

    /// Studio reply, once one is attached
    pub admin_reply: Option<String>,

    /// Meeting link, once one is attached
    pub meeting_link: Option<String>,

    /// The date and time the appointment was requested
    pub created_at: String,
}

impl From<AppointmentRecord> for AppointmentResponse {
    fn from(appointment: AppointmentRecord) -> Self {
        Self {
            uuid: appointment.uuid.into(),
            name: appointment.name,
            email: appointment.email,
            date: appointment.date.to_string(),
            time_slot: appointment.time_slot,
            mode: appointment.mode.as_str().to_string(),
            purpose: appointment.purpose,
            remarks: appointment.remarks,
            status: appointment.status.as_str().to_string(),
            admin_reply: appointment.admin_reply,
            meeting_link: appointment.meeting_link,
            created_at: appointment.created_at.to_string(),
        }
    }
}

/// Book Appointment Handler
///
/// Books a consultation slot for the authenticated account.
#[endpoint(
    tags("appointments"),
    summary = "Book Appointment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Appointment booked"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BookAppointmentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AppointmentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let request = json.into_inner();

    let date = request
        .date
        .parse::<Timestamp>()
        .map_err(|_error| StatusError::bad_request().brief("date must be an RFC 3339 timestamp"))?;

    let mode = AppointmentMode::parse(&request.mode)
        .ok_or_else(|| StatusError::bad_request().brief("Unknown appointment mode"))?;

    let appointment = state
        .app
        .appointments
        .book_appointment(
            user,
            BookAppointment {
                name: request.name,
                email: request.email,
                date,
                time_slot: request.time_slot,
                mode,
                purpose: request.purpose,
                remarks: request.remarks,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(appointment.into()))
}
