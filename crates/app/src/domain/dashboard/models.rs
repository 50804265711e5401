//! Dashboard models.

use jiff::Timestamp;
use uuid::Uuid;

/// Platform-wide counters for the admin overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformStats {
    pub projects: u64,
    pub designs: u64,
    pub users: u64,

    /// Completed sales count.
    pub sales: u64,

    /// Sum of completed-sale amounts, in minor currency units.
    pub revenue: u64,
}

/// What a feed entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Design,
    Project,
}

impl ActivityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Design => "design",
            Self::Project => "project",
        }
    }
}

/// One entry in the recent-activity feed.
#[derive(Debug, Clone)]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub uuid: Uuid,
    pub title: String,

    /// Display message shown in the feed.
    pub message: String,

    /// Thumbnail for design entries.
    pub image_url: Option<String>,

    pub created_at: Timestamp,
}
