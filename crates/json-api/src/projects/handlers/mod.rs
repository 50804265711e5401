//! Project Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod top;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use atelier_app::{
        domain::projects::{ProjectEstimates, ProjectRecord, ProjectStatus, ProjectUuid},
        media::StoredAsset,
    };

    pub(super) fn make_project(uuid: ProjectUuid, title: &str) -> ProjectRecord {
        ProjectRecord {
            uuid,
            title: title.to_string(),
            description: format!("{title} description"),
            location: "Sambalpur".to_string(),
            status: ProjectStatus::Ongoing,
            estimates: ProjectEstimates::default(),
            images: vec![StoredAsset {
                url: "https://files.media.test/atelier/image/upload/projects/site.jpg".to_string(),
                public_id: "projects/site.jpg".to_string(),
            }],
            model_3d: None,
            model_embed_url: None,
            is_featured: false,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
