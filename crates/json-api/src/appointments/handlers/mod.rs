//! Appointment Handlers

pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use atelier_app::{
        auth::UserUuid,
        domain::appointments::{
            AppointmentMode, AppointmentRecord, AppointmentStatus, AppointmentUuid,
        },
    };

    pub(super) fn make_appointment(
        uuid: AppointmentUuid,
        user: UserUuid,
        status: AppointmentStatus,
    ) -> AppointmentRecord {
        AppointmentRecord {
            uuid,
            user_uuid: user,
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            date: Timestamp::UNIX_EPOCH,
            time_slot: "10:00 AM".to_string(),
            mode: AppointmentMode::VideoCall,
            purpose: "Site consultation".to_string(),
            remarks: None,
            status,
            admin_reply: None,
            meeting_link: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
