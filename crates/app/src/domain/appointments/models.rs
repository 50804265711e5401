//! Appointment models.

use jiff::Timestamp;

use crate::{auth::UserUuid, uuids::TypedUuid};

/// Appointment UUID
pub type AppointmentUuid = TypedUuid<AppointmentRecord>;

/// Appointment lifecycle.
///
/// Valid transitions are `pending -> confirmed | cancelled` and
/// `confirmed -> completed | cancelled`; `completed` and `cancelled` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether moving from `self` to `next` is a valid transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Completed | Self::Cancelled)
        )
    }
}

/// How the consultation takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentMode {
    VideoCall,
    VoiceCall,
    InPerson,
}

impl AppointmentMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VideoCall => "Video Call",
            Self::VoiceCall => "Voice Call",
            Self::InPerson => "In-Person",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Video Call" => Some(Self::VideoCall),
            "Voice Call" => Some(Self::VoiceCall),
            "In-Person" => Some(Self::InPerson),
            _ => None,
        }
    }
}

/// Appointment as persisted.
#[derive(Debug, Clone)]
pub struct AppointmentRecord {
    pub uuid: AppointmentUuid,
    pub user_uuid: UserUuid,

    /// Contact name supplied at booking time.
    pub name: String,

    /// Contact email supplied at booking time.
    pub email: String,

    pub date: Timestamp,
    pub time_slot: String,
    pub mode: AppointmentMode,
    pub purpose: String,
    pub remarks: Option<String>,
    pub status: AppointmentStatus,
    pub admin_reply: Option<String>,
    pub meeting_link: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Booking payload.
#[derive(Debug, Clone)]
pub struct BookAppointment {
    pub name: String,
    pub email: String,
    pub date: Timestamp,
    pub time_slot: String,
    pub mode: AppointmentMode,
    pub purpose: String,
    pub remarks: Option<String>,
}

/// Studio response to an appointment. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct AppointmentUpdate {
    pub status: Option<AppointmentStatus>,
    pub admin_reply: Option<String>,
    pub meeting_link: Option<String>,
}
