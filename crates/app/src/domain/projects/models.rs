//! Project models.

use jiff::Timestamp;

use crate::{media::StoredAsset, uuids::TypedUuid};

/// Project UUID
pub type ProjectUuid = TypedUuid<ProjectRecord>;

/// Delivery status shown on the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Proposed,
    Ongoing,
    Completed,
}

impl ProjectStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Proposed => "Proposed",
            Self::Ongoing => "Ongoing",
            Self::Completed => "Completed",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Proposed" => Some(Self::Proposed),
            "Ongoing" => Some(Self::Ongoing),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Free-text delivery estimates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEstimates {
    pub cost: String,
    pub duration: String,
    pub area: String,
}

impl Default for ProjectEstimates {
    fn default() -> Self {
        Self {
            cost: "TBD".to_string(),
            duration: "TBD".to_string(),
            area: "TBD".to_string(),
        }
    }
}

/// Project as persisted.
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub uuid: ProjectUuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub status: ProjectStatus,
    pub estimates: ProjectEstimates,

    /// Gallery images.
    pub images: Vec<StoredAsset>,

    /// Optional 3D model (`glb`/`gltf`).
    pub model_3d: Option<StoredAsset>,

    /// Optional third-party viewer embed.
    pub model_embed_url: Option<String>,

    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Project creation payload (assets already stored).
#[derive(Debug, Clone)]
pub struct NewProject {
    pub uuid: ProjectUuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub status: ProjectStatus,
    pub estimates: ProjectEstimates,
    pub images: Vec<StoredAsset>,
    pub model_3d: Option<StoredAsset>,
    pub model_embed_url: Option<String>,
    pub is_featured: bool,
}
