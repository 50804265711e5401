//! Test Helpers

use jiff::Timestamp;

use crate::{
    auth::JwtKeys,
    domain::{
        appointments::{AppointmentMode, BookAppointment},
        designs::{DesignCategory, DesignUuid, NewDesign},
        projects::{NewProject, ProjectEstimates, ProjectStatus, ProjectUuid},
    },
    media::StoredAsset,
    secrets::SecretString,
};

pub(crate) fn test_jwt_keys() -> JwtKeys {
    JwtKeys::new(&SecretString::from("test_jwt_secret"))
}

pub(crate) fn stored_object(public_id: &str) -> StoredAsset {
    StoredAsset {
        url: format!("https://files.media.test/atelier/raw/upload/{public_id}"),
        public_id: public_id.to_string(),
    }
}

pub(crate) fn new_design(title: &str, price: u64) -> NewDesign {
    NewDesign {
        uuid: DesignUuid::new(),
        title: title.to_string(),
        description: format!("{title} description"),
        category: DesignCategory::Residential,
        material: "Concrete".to_string(),
        price,
        image: stored_object("covers/cover.jpg"),
        public_doc: None,
        private_doc: None,
    }
}

pub(crate) fn new_design_with_docs(title: &str, price: u64) -> NewDesign {
    NewDesign {
        public_doc: Some(stored_object("docs/brochure.pdf")),
        private_doc: Some(stored_object("docs/blueprints.pdf")),
        ..new_design(title, price)
    }
}

pub(crate) fn new_project(title: &str) -> NewProject {
    NewProject {
        uuid: ProjectUuid::new(),
        title: title.to_string(),
        description: format!("{title} description"),
        location: "Sambalpur".to_string(),
        status: ProjectStatus::Ongoing,
        estimates: ProjectEstimates::default(),
        images: vec![stored_object("projects/site.jpg")],
        model_3d: None,
        model_embed_url: None,
        is_featured: false,
    }
}

pub(crate) fn book_appointment(name: &str, email: &str) -> BookAppointment {
    BookAppointment {
        name: name.to_string(),
        email: email.to_string(),
        date: Timestamp::now() + jiff::SignedDuration::from_hours(48),
        time_slot: "10:00 AM".to_string(),
        mode: AppointmentMode::VideoCall,
        purpose: "Site consultation".to_string(),
        remarks: None,
    }
}
