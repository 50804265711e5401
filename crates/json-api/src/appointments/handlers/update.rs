//! Update Appointment Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::{JsonBody, PathParam}},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use atelier_app::domain::appointments::{AppointmentStatus, AppointmentUpdate};

use crate::{
    appointments::{create::AppointmentResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Update Appointment Request. Absent fields are left unchanged.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateAppointmentRequest {
    /// New status; must be a valid transition from the current one
    pub status: Option<String>,

    pub admin_reply: Option<String>,

    pub meeting_link: Option<String>,
}

/// Update Appointment Handler
///
/// Admin only. Applies the studio's response: a status transition, a reply,
/// a meeting link, or any combination.
#[endpoint(
    tags("appointments"),
    summary = "Update Appointment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Appointment updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid transition"),
        (status_code = StatusCode::NOT_FOUND, description = "Appointment not found"),
    ),
)]
pub(crate) async fn handler(
    appointment: PathParam<Uuid>,
    json: JsonBody<UpdateAppointmentRequest>,
    depot: &mut Depot,
) -> Result<Json<AppointmentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let status = request
        .status
        .map(|value| {
            AppointmentStatus::parse(&value)
                .ok_or_else(|| StatusError::bad_request().brief("Unknown appointment status"))
        })
        .transpose()?;

    let updated = state
        .app
        .appointments
        .update_appointment(
            appointment.into_inner().into(),
            AppointmentUpdate {
                status,
                admin_reply: request.admin_reply,
                meeting_link: request.meeting_link,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
