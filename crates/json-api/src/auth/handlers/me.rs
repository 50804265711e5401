//! Current Profile Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use atelier_app::auth::CurrentUser;

use crate::extensions::*;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the account
    pub uuid: Uuid,

    pub name: String,

    pub email: String,

    /// `user` or `admin`
    pub role: String,
}

impl From<&CurrentUser> for UserResponse {
    fn from(user: &CurrentUser) -> Self {
        Self {
            uuid: user.uuid.into(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
        }
    }
}

/// Current Profile Handler
///
/// Returns the authenticated account's profile.
#[endpoint(tags("auth"), summary = "Current profile", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let user = depot.current_user_or_401()?;

    Ok(Json(user.into()))
}
