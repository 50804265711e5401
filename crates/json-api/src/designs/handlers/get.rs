//! Get Design Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use atelier_app::domain::designs::DesignRecord;

use crate::{designs::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DesignResponse {
    /// The unique identifier of the design
    pub uuid: Uuid,

    pub title: String,

    pub description: String,

    pub category: String,

    pub material: String,

    /// Licence price in minor currency units
    pub price: u64,

    /// Cover image URL
    pub image_url: String,

    /// Whether freely downloadable documentation is attached
    pub has_public_doc: bool,

    /// Whether purchase-gated documentation is attached
    pub has_private_doc: bool,

    /// The date and time the design was created
    pub created_at: String,

    /// The date and time the design was last updated
    pub updated_at: String,
}

impl From<DesignRecord> for DesignResponse {
    fn from(design: DesignRecord) -> Self {
        Self {
            uuid: design.uuid.into(),
            title: design.title,
            description: design.description,
            category: design.category.as_str().to_string(),
            material: design.material,
            price: design.price,
            image_url: design.image.url,
            has_public_doc: design.public_doc.is_some(),
            has_private_doc: design.private_doc.is_some(),
            created_at: design.created_at.to_string(),
            updated_at: design.updated_at.to_string(),
        }
    }
}

/// Get Design Handler
///
/// Returns a design.
#[endpoint(tags("designs"), summary = "Get Design")]
pub(crate) async fn handler(
    design: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<DesignResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let design = state
        .app
        .designs
        .get_design(design.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(design.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use atelier_app::domain::designs::{DesignUuid, DesignsServiceError, MockDesignsService};

    use crate::{
        designs::handlers::tests::make_design,
        test_helpers::{TestState, public_service},
    };

    use super::*;

    fn service_with(designs: MockDesignsService) -> Service {
        public_service(
            TestState {
                designs,
                ..TestState::default()
            },
            Router::with_path("designs/{design}").get(handler),
        )
    }

    #[tokio::test]
    async fn returns_the_design() -> TestResult {
        let uuid = DesignUuid::new();
        let design = make_design(uuid, "Hillside Villa", 50_000);

        let mut designs = MockDesignsService::new();
        designs
            .expect_get_design()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(move |_| Ok(design));

        let response: DesignResponse =
            TestClient::get(format!("http://example.com/designs/{uuid}"))
                .send(&service_with(designs))
                .await
                .take_json()
                .await?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.title, "Hillside Villa");
        assert_eq!(response.price, 50_000);
        assert!(!response.has_private_doc);

        Ok(())
    }

    #[tokio::test]
    async fn missing_design_returns_404() -> TestResult {
        let uuid = DesignUuid::new();

        let mut designs = MockDesignsService::new();
        designs
            .expect_get_design()
            .once()
            .return_once(|_| Err(DesignsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/designs/{uuid}"))
            .send(&service_with(designs))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
