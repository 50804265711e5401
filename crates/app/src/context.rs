//! App Context

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use crate::{
    auth::{AuthService, JwtKeys, PgAuthService},
    database,
    domain::{
        appointments::{AppointmentsService, PgAppointmentsService},
        dashboard::{DashboardService, PgDashboardService},
        designs::{DesignsService, PgDesignsService},
        downloads::{DownloadsService, PgDownloadsService},
        projects::{PgProjectsService, ProjectsService},
        transactions::{PgTransactionsService, TransactionsService},
    },
    gateway::PaymentGateway,
    mailer::Mailer,
    media::MediaStore,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// External collaborators and settings the services are wired with.
pub struct AppDependencies {
    /// JWT signing/verification keys.
    pub keys: JwtKeys,

    pub gateway: Arc<dyn PaymentGateway>,

    pub media: Arc<dyn MediaStore>,

    pub mailer: Arc<dyn Mailer>,

    /// Studio address alerted on sales and bookings, when configured.
    pub admin_email: Option<String>,

    /// Public site base URL, used to build password-reset links.
    pub client_url: String,
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub designs: Arc<dyn DesignsService>,
    pub projects: Arc<dyn ProjectsService>,
    pub transactions: Arc<dyn TransactionsService>,
    pub downloads: Arc<dyn DownloadsService>,
    pub appointments: Arc<dyn AppointmentsService>,
    pub dashboard: Arc<dyn DashboardService>,

    /// Direct store handle for request-time uploads.
    pub media: Arc<dyn MediaStore>,
}

impl AppContext {
    /// Wire every service around a connection pool.
    #[must_use]
    pub fn new(pool: PgPool, deps: AppDependencies) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(
                pool.clone(),
                deps.keys,
                deps.mailer.clone(),
                deps.client_url,
            )),
            designs: Arc::new(PgDesignsService::new(pool.clone(), deps.media.clone())),
            projects: Arc::new(PgProjectsService::new(pool.clone(), deps.media.clone())),
            transactions: Arc::new(PgTransactionsService::new(
                pool.clone(),
                deps.gateway,
                deps.mailer.clone(),
                deps.admin_email.clone(),
            )),
            downloads: Arc::new(PgDownloadsService::new(pool.clone(), deps.media.clone())),
            appointments: Arc::new(PgAppointmentsService::new(
                pool.clone(),
                deps.mailer,
                deps.admin_email,
            )),
            dashboard: Arc::new(PgDashboardService::new(pool)),
            media: deps.media,
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        deps: AppDependencies,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::new(pool, deps))
    }
}
