//! Atelier JSON API Server

use std::{process, sync::Arc};

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use atelier_app::{
    auth::JwtKeys,
    context::{AppContext, AppDependencies},
    gateway::{GatewayConfig, HttpPaymentGateway},
    mailer::{SmtpConfig, SmtpMailer},
    media::{HttpMediaStore, MediaConfig},
    secrets::SecretString,
};

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod appointments;
mod auth;
mod config;
mod dashboard;
mod designs;
mod extensions;
mod healthcheck;
mod projects;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod transactions;
mod uploads;

/// Atelier JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let keys = JwtKeys::new(&SecretString::from(config.jwt_secret));

    let gateway = Arc::new(HttpPaymentGateway::new(GatewayConfig {
        addr: config.gateway_addr,
        key_id: config.gateway_key_id,
        key_secret: SecretString::from(config.gateway_key_secret),
    }));

    let media = Arc::new(HttpMediaStore::new(MediaConfig {
        api_addr: config.media_api_addr,
        delivery_addr: config.media_delivery_addr,
        cloud_name: config.media_cloud_name,
        api_key: config.media_api_key,
        api_secret: SecretString::from(config.media_api_secret),
    }));

    let mailer = match SmtpMailer::new(SmtpConfig {
        host: config.smtp_host,
        username: config.smtp_username,
        password: SecretString::from(config.smtp_password),
        sender: config.mail_sender,
    }) {
        Ok(mailer) => Arc::new(mailer),
        Err(init_error) => {
            error!("failed to initialize mailer: {init_error}");

            process::exit(1);
        }
    };

    let deps = AppDependencies {
        keys,
        gateway,
        media,
        mailer,
        admin_email: config.admin_email,
        client_url: config.client_url,
    };

    let app = match AppContext::from_database_url(&config.database_url, deps).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(router::app_router());

    let doc = OpenApi::new("Atelier API", "0.1.0")
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
