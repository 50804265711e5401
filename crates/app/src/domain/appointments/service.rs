//! Appointments service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::error;

use crate::{
    auth::CurrentUser,
    domain::appointments::{
        errors::AppointmentsServiceError,
        models::{
            AppointmentRecord, AppointmentStatus, AppointmentUpdate, AppointmentUuid,
            BookAppointment,
        },
        repository::PgAppointmentsRepository,
    },
    mailer::{Mailer, messages},
};

#[derive(Clone)]
pub struct PgAppointmentsService {
    repository: PgAppointmentsRepository,
    mailer: Arc<dyn Mailer>,

    /// Address alerted on every booking, when configured.
    admin_email: Option<String>,
}

impl PgAppointmentsService {
    #[must_use]
    pub fn new(pool: PgPool, mailer: Arc<dyn Mailer>, admin_email: Option<String>) -> Self {
        Self {
            repository: PgAppointmentsRepository::new(pool),
            mailer,
            admin_email,
        }
    }

    /// Booking alerts. Failures are logged and swallowed: the row insert is
    /// the primary operation.
    async fn send_booking_emails(&self, appointment: &AppointmentRecord) {
        let date = appointment.date.to_string();

        if let Some(admin_email) = &self.admin_email {
            let alert = messages::appointment_alert(
                admin_email,
                &appointment.name,
                &date,
                &appointment.time_slot,
                appointment.mode.as_str(),
                &appointment.purpose,
            );
            if let Err(err) = self.mailer.send(alert).await {
                error!("failed to send appointment alert for {}: {err}", appointment.uuid);
            }
        }

        let received = messages::appointment_received(
            &appointment.email,
            &appointment.name,
            &date,
            &appointment.time_slot,
        );
        if let Err(err) = self.mailer.send(received).await {
            error!(
                "failed to send appointment confirmation for {}: {err}",
                appointment.uuid
            );
        }
    }
}

#[async_trait]
impl AppointmentsService for PgAppointmentsService {
    async fn book_appointment(
        &self,
        user: &CurrentUser,
        booking: BookAppointment,
    ) -> Result<AppointmentRecord, AppointmentsServiceError> {
        validate_booking(&booking)?;

        let appointment = self
            .repository
            .create(AppointmentUuid::new(), user.uuid, &booking)
            .await?;

        self.send_booking_emails(&appointment).await;

        Ok(appointment)
    }

    async fn list_appointments(
        &self,
        user: &CurrentUser,
    ) -> Result<Vec<AppointmentRecord>, AppointmentsServiceError> {
        if user.role.is_admin() {
            Ok(self.repository.list().await?)
        } else {
            Ok(self.repository.list_for_user(user.uuid).await?)
        }
    }

    async fn update_appointment(
        &self,
        appointment: AppointmentUuid,
        update: AppointmentUpdate,
    ) -> Result<AppointmentRecord, AppointmentsServiceError> {
        let current = self.repository.get(appointment).await?;

        let status = match update.status {
            Some(next) => {
                if !current.status.can_transition_to(next) {
                    return Err(AppointmentsServiceError::InvalidTransition);
                }

                next
            }
            None => current.status,
        };

        let updated = self
            .repository
            .update(
                appointment,
                status,
                update.admin_reply.as_deref(),
                update.meeting_link.as_deref(),
            )
            .await?;

        let status_changed = updated.status != current.status;
        if status_changed || update.admin_reply.is_some() {
            let message = messages::appointment_updated(
                &updated.email,
                &updated.name,
                updated.status.as_str(),
                updated.meeting_link.as_deref(),
                updated.admin_reply.as_deref(),
            );
            if let Err(err) = self.mailer.send(message).await {
                error!("failed to send appointment update for {}: {err}", updated.uuid);
            }
        }

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait AppointmentsService: Send + Sync {
    /// Book a consultation slot; the appointment starts out `pending`.
    async fn book_appointment(
        &self,
        user: &CurrentUser,
        booking: BookAppointment,
    ) -> Result<AppointmentRecord, AppointmentsServiceError>;

    /// Admins see every appointment; everyone else sees their own.
    async fn list_appointments(
        &self,
        user: &CurrentUser,
    ) -> Result<Vec<AppointmentRecord>, AppointmentsServiceError>;

    /// Apply the studio's response: status transition, reply, meeting link.
    async fn update_appointment(
        &self,
        appointment: AppointmentUuid,
        update: AppointmentUpdate,
    ) -> Result<AppointmentRecord, AppointmentsServiceError>;
}

fn validate_booking(booking: &BookAppointment) -> Result<(), AppointmentsServiceError> {
    if booking.name.trim().is_empty() {
        return Err(AppointmentsServiceError::Invalid("a name is required"));
    }

    if !booking.email.contains('@') {
        return Err(AppointmentsServiceError::Invalid("a valid email is required"));
    }

    if booking.time_slot.trim().is_empty() {
        return Err(AppointmentsServiceError::Invalid("a time slot is required"));
    }

    if booking.purpose.trim().is_empty() {
        return Err(AppointmentsServiceError::Invalid("a purpose is required"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        mailer::MockMailer,
        test::{TestContext, book_appointment},
    };

    use super::*;

    const ADMIN_EMAIL: &str = "studio@example.com";

    fn service(ctx: &TestContext, mailer: MockMailer) -> PgAppointmentsService {
        PgAppointmentsService::new(
            ctx.pool().clone(),
            Arc::new(mailer),
            Some(ADMIN_EMAIL.to_string()),
        )
    }

    fn relaxed_mailer() -> MockMailer {
        let mut mailer = MockMailer::new();
        mailer.expect_send().returning(|_message| Ok(()));

        mailer
    }

    #[tokio::test]
    async fn booking_starts_pending_and_alerts_both_parties() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("user@example.com").await;

        // One studio alert plus one requester confirmation.
        let mut mailer = MockMailer::new();
        mailer.expect_send().times(2).returning(|_message| Ok(()));

        let appointments = service(&ctx, mailer);

        let booked = appointments
            .book_appointment(&user, book_appointment("Asha Rao", "asha@example.com"))
            .await?;

        assert_eq!(booked.status, AppointmentStatus::Pending);
        assert_eq!(booked.user_uuid, user.uuid);
        assert_eq!(booked.email, "asha@example.com");
        assert!(booked.admin_reply.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn booking_survives_mail_failure() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("user@example.com").await;

        let mut mailer = MockMailer::new();
        mailer.expect_send().times(2).returning(|_message| {
            Err(crate::mailer::MailerError::Address(
                "@".parse::<lettre::Address>().unwrap_err(),
            ))
        });

        let appointments = service(&ctx, mailer);

        let booked = appointments
            .book_appointment(&user, book_appointment("Asha Rao", "asha@example.com"))
            .await?;

        assert_eq!(booked.status, AppointmentStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn booking_rejects_blank_fields() {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("user@example.com").await;
        let appointments = service(&ctx, MockMailer::new());

        let mut booking = book_appointment("Asha Rao", "asha@example.com");
        booking.purpose = "  ".to_string();

        let result = appointments.book_appointment(&user, booking).await;

        assert!(
            matches!(result, Err(AppointmentsServiceError::Invalid(_))),
            "expected Invalid, got {result:?}"
        );
    }

    #[tokio::test]
    async fn listing_is_role_scoped() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = ctx.create_user("alice@example.com").await;
        let bob = ctx.create_user("bob@example.com").await;
        let admin = ctx.create_admin("admin@example.com").await;

        let appointments = service(&ctx, relaxed_mailer());

        appointments
            .book_appointment(&alice, book_appointment("Alice", "alice@example.com"))
            .await?;
        appointments
            .book_appointment(&bob, book_appointment("Bob", "bob@example.com"))
            .await?;

        assert_eq!(appointments.list_appointments(&alice).await?.len(), 1);
        assert_eq!(appointments.list_appointments(&admin).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn confirm_attaches_reply_and_link() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("user@example.com").await;

        let appointments = service(&ctx, relaxed_mailer());

        let booked = appointments
            .book_appointment(&user, book_appointment("Asha Rao", "asha@example.com"))
            .await?;

        let updated = appointments
            .update_appointment(
                booked.uuid,
                AppointmentUpdate {
                    status: Some(AppointmentStatus::Confirmed),
                    admin_reply: Some("See you then".to_string()),
                    meeting_link: Some("https://meet.example.com/abc".to_string()),
                },
            )
            .await?;

        assert_eq!(updated.status, AppointmentStatus::Confirmed);
        assert_eq!(updated.admin_reply.as_deref(), Some("See you then"));
        assert_eq!(
            updated.meeting_link.as_deref(),
            Some("https://meet.example.com/abc")
        );

        Ok(())
    }

    #[tokio::test]
    async fn pending_cannot_jump_to_completed() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("user@example.com").await;

        let appointments = service(&ctx, relaxed_mailer());

        let booked = appointments
            .book_appointment(&user, book_appointment("Asha Rao", "asha@example.com"))
            .await?;

        let result = appointments
            .update_appointment(
                booked.uuid,
                AppointmentUpdate {
                    status: Some(AppointmentStatus::Completed),
                    ..AppointmentUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(AppointmentsServiceError::InvalidTransition)),
            "expected InvalidTransition, got {result:?}"
        );

        // The appointment is untouched.
        let listed = appointments.list_appointments(&user).await?;
        assert_eq!(listed[0].status, AppointmentStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn cancelled_is_terminal() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("user@example.com").await;

        let appointments = service(&ctx, relaxed_mailer());

        let booked = appointments
            .book_appointment(&user, book_appointment("Asha Rao", "asha@example.com"))
            .await?;

        appointments
            .update_appointment(
                booked.uuid,
                AppointmentUpdate {
                    status: Some(AppointmentStatus::Cancelled),
                    ..AppointmentUpdate::default()
                },
            )
            .await?;

        let result = appointments
            .update_appointment(
                booked.uuid,
                AppointmentUpdate {
                    status: Some(AppointmentStatus::Confirmed),
                    ..AppointmentUpdate::default()
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(AppointmentsServiceError::InvalidTransition)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn reply_without_status_keeps_status_and_notifies() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("user@example.com").await;

        // Two booking emails plus one update notification.
        let mut mailer = MockMailer::new();
        mailer.expect_send().times(3).returning(|_message| Ok(()));

        let appointments = service(&ctx, mailer);

        let booked = appointments
            .book_appointment(&user, book_appointment("Asha Rao", "asha@example.com"))
            .await?;

        let updated = appointments
            .update_appointment(
                booked.uuid,
                AppointmentUpdate {
                    admin_reply: Some("We need more details".to_string()),
                    ..AppointmentUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.status, AppointmentStatus::Pending);
        assert_eq!(updated.admin_reply.as_deref(), Some("We need more details"));

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_appointment_is_not_found() {
        let ctx = TestContext::new().await;
        let appointments = service(&ctx, MockMailer::new());

        let result = appointments
            .update_appointment(
                AppointmentUuid::new(),
                AppointmentUpdate {
                    status: Some(AppointmentStatus::Confirmed),
                    ..AppointmentUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(AppointmentsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
