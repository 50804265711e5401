//! Delete Design Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{designs::errors::into_status_error, extensions::*, state::State};

/// Delete Design Handler
///
/// Admin only. Removes the design row and destroys its stored objects.
#[endpoint(
    tags("designs"),
    summary = "Delete Design",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Design deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Design not found"),
    ),
)]
pub(crate) async fn handler(
    design: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .designs
        .delete_design(design.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::NO_CONTENT);

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use atelier_app::domain::designs::{DesignUuid, DesignsServiceError, MockDesignsService};

    use crate::test_helpers::{TestState, admin_service};

    use super::*;

    fn service_with(designs: MockDesignsService) -> Service {
        admin_service(
            TestState {
                designs,
                ..TestState::default()
            },
            Router::with_path("designs/{design}").delete(handler),
        )
    }

    #[tokio::test]
    async fn deletion_returns_204() -> TestResult {
        let uuid = DesignUuid::new();

        let mut designs = MockDesignsService::new();
        designs
            .expect_delete_design()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/designs/{uuid}"))
            .send(&service_with(designs))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn missing_design_returns_404() -> TestResult {
        let uuid = DesignUuid::new();

        let mut designs = MockDesignsService::new();
        designs
            .expect_delete_design()
            .once()
            .return_once(|_| Err(DesignsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/designs/{uuid}"))
            .send(&service_with(designs))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
