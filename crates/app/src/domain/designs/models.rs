//! Design models.

use jiff::Timestamp;

use crate::{media::StoredAsset, uuids::TypedUuid};

/// Design UUID
pub type DesignUuid = TypedUuid<DesignRecord>;

/// Catalogue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignCategory {
    Residential,
    Commercial,
    Industrial,
    Landscape,
    Interior,
    Other,
}

impl DesignCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Residential => "Residential",
            Self::Commercial => "Commercial",
            Self::Industrial => "Industrial",
            Self::Landscape => "Landscape",
            Self::Interior => "Interior",
            Self::Other => "Other",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Residential" => Some(Self::Residential),
            "Commercial" => Some(Self::Commercial),
            "Industrial" => Some(Self::Industrial),
            "Landscape" => Some(Self::Landscape),
            "Interior" => Some(Self::Interior),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Design as persisted.
#[derive(Debug, Clone)]
pub struct DesignRecord {
    pub uuid: DesignUuid,
    pub title: String,
    pub description: String,
    pub category: DesignCategory,
    pub material: String,

    /// Licence price in minor currency units.
    pub price: u64,

    /// Cover image.
    pub image: StoredAsset,

    /// Freely downloadable documentation, if any.
    pub public_doc: Option<StoredAsset>,

    /// Purchase-gated documentation, if any.
    pub private_doc: Option<StoredAsset>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Design creation payload (assets already stored).
#[derive(Debug, Clone)]
pub struct NewDesign {
    pub uuid: DesignUuid,
    pub title: String,
    pub description: String,
    pub category: DesignCategory,
    pub material: String,
    pub price: u64,
    pub image: StoredAsset,
    pub public_doc: Option<StoredAsset>,
    pub private_doc: Option<StoredAsset>,
}

/// Catalogue listing filters. All fields combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignFilter {
    /// Case-insensitive match against title or description.
    pub search: Option<String>,

    pub category: Option<DesignCategory>,

    /// Case-insensitive substring match.
    pub material: Option<String>,

    pub min_price: Option<u64>,

    pub max_price: Option<u64>,
}

/// One page of the catalogue.
#[derive(Debug, Clone)]
pub struct DesignPage {
    pub designs: Vec<DesignRecord>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}
