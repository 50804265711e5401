//! Auth data models.

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Account role. Admins can upload and delete catalogue entries, manage
/// appointments, read analytics, and download any private resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// User account as persisted.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub organization: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Signup payload.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub organization: String,
}

/// The authenticated identity attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<&UserRecord> for CurrentUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            uuid: record.uuid,
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role,
        }
    }
}

/// Result of a successful signup or login.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user: CurrentUser,
}

/// Password-reset code as persisted.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub uuid: uuid::Uuid,
    pub email: String,
    pub code: String,
    pub created_at: Timestamp,
}
