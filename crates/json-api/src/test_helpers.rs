//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use atelier_app::{
    auth::{CurrentUser, MockAuthService, UserRole, UserUuid},
    context::AppContext,
    domain::{
        appointments::MockAppointmentsService, dashboard::MockDashboardService,
        designs::MockDesignsService, downloads::MockDownloadsService,
        projects::MockProjectsService, transactions::MockTransactionsService,
    },
    media::MockMediaStore,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());
pub(crate) const TEST_ADMIN_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));

pub(crate) fn test_user() -> CurrentUser {
    CurrentUser {
        uuid: TEST_USER_UUID,
        name: "Test User".to_string(),
        email: "user@example.com".to_string(),
        role: UserRole::User,
    }
}

pub(crate) fn test_admin() -> CurrentUser {
    CurrentUser {
        uuid: TEST_ADMIN_UUID,
        name: "Test Admin".to_string(),
        email: "admin@example.com".to_string(),
        role: UserRole::Admin,
    }
}

/// Mock services for one handler test. Mockall panics on any call without a
/// matching expectation, so untouched fields double as "never called" checks.
#[derive(Default)]
pub(crate) struct TestState {
    pub auth: MockAuthService,
    pub designs: MockDesignsService,
    pub projects: MockProjectsService,
    pub transactions: MockTransactionsService,
    pub downloads: MockDownloadsService,
    pub appointments: MockAppointmentsService,
    pub dashboard: MockDashboardService,
    pub media: MockMediaStore,
}

impl TestState {
    pub(crate) fn build(self) -> Arc<State> {
        let media = Arc::new(self.media);

        Arc::new(State::new(AppContext {
            auth: Arc::new(self.auth),
            designs: Arc::new(self.designs),
            projects: Arc::new(self.projects),
            transactions: Arc::new(self.transactions),
            downloads: Arc::new(self.downloads),
            appointments: Arc::new(self.appointments),
            dashboard: Arc::new(self.dashboard),
            media,
        }))
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(test_user());
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(test_admin());
    ctrl.call_next(req, depot, res).await;
}

/// Route served without any identity attached.
pub(crate) fn public_service(state: TestState, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state.build())).push(route))
}

/// Route served as the regular test user.
pub(crate) fn authed_service(state: TestState, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state.build()))
            .hoop(inject_user)
            .push(route),
    )
}

/// Route served as the test admin.
pub(crate) fn admin_service(state: TestState, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state.build()))
            .hoop(inject_admin)
            .push(route),
    )
}
