//! App Router

use salvo::Router;

use crate::{appointments, auth, dashboard, designs, projects, transactions};

/// The versioned `/api` tree.
pub(crate) fn app_router() -> Router {
    Router::with_path("api")
        .push(auth_routes())
        .push(design_routes())
        .push(project_routes())
        .push(transaction_routes())
        .push(appointment_routes())
        .push(dashboard_routes())
}

fn auth_routes() -> Router {
    Router::with_path("auth")
        .push(Router::with_path("signup").post(auth::handlers::signup::handler))
        .push(Router::with_path("login").post(auth::handlers::login::handler))
        .push(Router::with_path("forgot-password").post(auth::handlers::forgot_password::handler))
        .push(
            Router::with_path("verify-reset-otp").post(auth::handlers::verify_reset_otp::handler),
        )
        .push(Router::with_path("reset-password").post(auth::handlers::reset_password::handler))
        .push(
            Router::with_path("me")
                .hoop(auth::middleware::require_auth)
                .get(auth::handlers::me::handler),
        )
}

fn design_routes() -> Router {
    Router::with_path("designs")
        .get(designs::index::handler)
        .push(
            // Download links open outside the app shell, so identity is
            // optional here and may arrive as a query token.
            Router::with_path("{design}/download")
                .hoop(auth::middleware::optional_auth)
                .get(designs::download::handler),
        )
        .push(Router::with_path("{design}").get(designs::get::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::require_auth)
                .hoop(auth::middleware::require_admin)
                .post(designs::create::handler)
                .push(Router::with_path("{design}").delete(designs::delete::handler)),
        )
}

fn project_routes() -> Router {
    Router::with_path("projects")
        .get(projects::index::handler)
        .push(Router::with_path("top").get(projects::top::handler))
        .push(Router::with_path("{project}").get(projects::get::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::require_auth)
                .hoop(auth::middleware::require_admin)
                .post(projects::create::handler)
                .push(Router::with_path("{project}").delete(projects::delete::handler)),
        )
}

fn transaction_routes() -> Router {
    Router::with_path("transactions")
        .hoop(auth::middleware::require_auth)
        .push(Router::with_path("order").post(transactions::order::handler))
        .push(Router::with_path("verify").post(transactions::verify::handler))
        .push(Router::with_path("my-orders").get(transactions::my_orders::handler))
        .push(Router::with_path("check/{design}").get(transactions::check::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::require_admin)
                .push(Router::with_path("admin/all").get(transactions::admin_index::handler))
                .push(
                    Router::with_path("design/{design}/stats")
                        .get(transactions::design_stats::handler),
                ),
        )
}

fn appointment_routes() -> Router {
    Router::with_path("appointments")
        .hoop(auth::middleware::require_auth)
        .post(appointments::create::handler)
        .get(appointments::index::handler)
        .push(
            Router::with_path("{appointment}")
                .hoop(auth::middleware::require_admin)
                .put(appointments::update::handler),
        )
}

fn dashboard_routes() -> Router {
    Router::with_path("dashboard")
        .hoop(auth::middleware::require_auth)
        .push(Router::with_path("updates").get(dashboard::updates::handler))
        .push(
            Router::with_path("stats")
                .hoop(auth::middleware::require_admin)
                .get(dashboard::stats::handler),
        )
}
