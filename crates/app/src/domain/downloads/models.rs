//! Download models.

/// Which of a design's resources is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Freely downloadable documentation.
    Public,

    /// Purchase-gated documentation.
    Private,
}

impl ResourceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

/// Retrieved file ready to stream back as an attachment.
#[derive(Debug, Clone)]
pub struct FileDownload {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub filename: String,
}
