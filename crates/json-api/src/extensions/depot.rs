//! Depot helper extensions.

use std::any::Any;

use atelier_app::auth::CurrentUser;
use salvo::prelude::{Depot, StatusError};

const CURRENT_USER_KEY: &str = "current_user";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Attach the authenticated identity to the request.
    fn insert_current_user(&mut self, user: CurrentUser);

    /// The authenticated identity, if any middleware attached one.
    fn current_user(&self) -> Option<&CurrentUser>;

    fn current_user_or_401(&self) -> Result<&CurrentUser, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_current_user(&mut self, user: CurrentUser) {
        self.insert(CURRENT_USER_KEY, user);
    }

    fn current_user(&self) -> Option<&CurrentUser> {
        self.get::<CurrentUser>(CURRENT_USER_KEY).ok()
    }

    fn current_user_or_401(&self) -> Result<&CurrentUser, StatusError> {
        self.current_user()
            .ok_or_else(|| StatusError::unauthorized().brief("Authentication required"))
    }
}
