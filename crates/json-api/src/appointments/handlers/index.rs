//! Appointment Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    appointments::{create::AppointmentResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppointmentsResponse {
    /// Appointments visible to the caller, ordered by date
    pub appointments: Vec<AppointmentResponse>,
}

/// Appointment Index Handler
///
/// Admins see every appointment; everyone else sees their own.
#[endpoint(
    tags("appointments"),
    summary = "List Appointments",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AppointmentsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let appointments = state
        .app
        .appointments
        .list_appointments(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(AppointmentsResponse {
        appointments: appointments.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use atelier_app::domain::appointments::{
        AppointmentStatus, AppointmentUuid, MockAppointmentsService,
    };

    use crate::{
        appointments::handlers::tests::make_appointment,
        test_helpers::{TEST_USER_UUID, TestState, authed_service},
    };

    use super::*;

    #[tokio::test]
    async fn returns_the_callers_appointments() -> TestResult {
        let uuid = AppointmentUuid::new();

        let mut appointments = MockAppointmentsService::new();
        appointments
            .expect_list_appointments()
            .once()
            .withf(|user| user.uuid == TEST_USER_UUID)
            .return_once(move |user| {
                Ok(vec![make_appointment(
                    uuid,
                    user.uuid,
                    AppointmentStatus::Confirmed,
                )])
            });

        let response: AppointmentsResponse = TestClient::get("http://example.com/appointments")
            .send(&authed_service(
                TestState {
                    appointments,
                    ..TestState::default()
                },
                Router::with_path("appointments").get(handler),
            ))
            .await
            .take_json()
            .await?;

        assert_eq!(response.appointments.len(), 1);
        assert_eq!(response.appointments[0].status, "confirmed");

        Ok(())
    }
}
