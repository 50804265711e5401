//! Auth middleware.
//!
//! `require_auth` rejects requests without a valid bearer token,
//! `require_admin` additionally gates on the admin role, and
//! `optional_auth` attaches an identity when one is supplied (via header or
//! `?token=`) but lets guests through.

use std::sync::Arc;

use atelier_app::auth::AuthServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{debug, error};

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn require_auth(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req).map(ToString::to_string) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let user = match state.app.auth.authenticate_bearer(&token).await {
        Ok(user) => user,
        Err(AuthServiceError::InvalidToken | AuthServiceError::NotFound) => {
            res.render(StatusError::unauthorized().brief("Invalid or expired token"));

            return;
        }
        Err(source) => {
            error!("failed to authenticate bearer token: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_current_user(user);

    ctrl.call_next(req, depot, res).await;
}

/// Role gate. Must run after [`require_auth`].
#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match depot.current_user() {
        Some(user) if user.role.is_admin() => {
            ctrl.call_next(req, depot, res).await;
        }
        Some(_user) => {
            res.render(StatusError::forbidden().brief("Admin access required"));
        }
        None => {
            res.render(StatusError::unauthorized().brief("Authentication required"));
        }
    }
}

/// Attach an identity when the request carries a usable token.
///
/// Download links are opened outside the app's fetch layer, so the token may
/// arrive as a `?token=` query parameter instead of a header. Invalid tokens
/// are treated the same as no token: the request proceeds as a guest and the
/// entitlement checks downstream decide what is visible.
#[salvo::handler]
pub(crate) async fn optional_auth(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let token = extract_bearer_token(req)
        .map(ToString::to_string)
        .or_else(|| req.query::<String>("token"));

    if let Some(token) = token {
        let state = match depot.obtain::<Arc<State>>() {
            Ok(state) => state,
            Err(_error) => {
                res.render(StatusError::internal_server_error());

                return;
            }
        };

        match state.app.auth.authenticate_bearer(&token).await {
            Ok(user) => depot.insert_current_user(user),
            Err(source) => {
                debug!("ignoring unusable download token: {source}");
            }
        }
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use atelier_app::auth::MockAuthService;
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{TestState, test_admin, test_user};

    use super::*;

    #[salvo::handler]
    async fn echo_identity(depot: &mut Depot, res: &mut Response) {
        let identity = depot
            .current_user()
            .map_or_else(|| "guest".to_string(), |user| user.email.clone());

        res.render(identity);
    }

    fn service_with(auth: MockAuthService, gate: fn() -> Router) -> Service {
        let state = TestState {
            auth,
            ..TestState::default()
        }
        .build();

        Service::new(
            Router::new()
                .hoop(inject(state))
                .push(gate().push(Router::new().get(echo_identity))),
        )
    }

    fn require_auth_router() -> Router {
        Router::new().hoop(require_auth)
    }

    fn optional_auth_router() -> Router {
        Router::new().hoop(optional_auth)
    }

    #[tokio::test]
    async fn missing_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();
        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .send(&service_with(auth, require_auth_router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn non_bearer_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();
        auth.expect_authenticate_bearer().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&service_with(auth, require_auth_router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Err(AuthServiceError::InvalidToken));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&service_with(auth, require_auth_router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn valid_token_injects_the_user() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "abc123")
            .return_once(|_| Ok(test_user()));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&service_with(auth, require_auth_router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, test_user().email);

        Ok(())
    }

    #[tokio::test]
    async fn optional_auth_lets_guests_through() -> TestResult {
        let mut auth = MockAuthService::new();
        auth.expect_authenticate_bearer().never();

        let mut res = TestClient::get("http://example.com")
            .send(&service_with(auth, optional_auth_router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "guest");

        Ok(())
    }

    #[tokio::test]
    async fn optional_auth_accepts_a_query_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .withf(|token| token == "qtoken")
            .return_once(|_| Ok(test_user()));

        let mut res = TestClient::get("http://example.com?token=qtoken")
            .send(&service_with(auth, optional_auth_router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, test_user().email);

        Ok(())
    }

    #[tokio::test]
    async fn optional_auth_ignores_unusable_tokens() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidToken));

        let mut res = TestClient::get("http://example.com?token=stale")
            .send(&service_with(auth, optional_auth_router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "guest");

        Ok(())
    }

    #[tokio::test]
    async fn admin_gate_rejects_regular_users() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Ok(test_user()));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&service_with(auth, || {
                Router::new().hoop(require_auth).hoop(require_admin)
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn admin_gate_admits_admins() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Ok(test_admin()));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&service_with(auth, || {
                Router::new().hoop(require_auth).hoop(require_admin)
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
