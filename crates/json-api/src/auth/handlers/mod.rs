//! Account Handlers

pub(crate) mod forgot_password;
pub(crate) mod login;
pub(crate) mod me;
pub(crate) mod reset_password;
pub(crate) mod signup;
pub(crate) mod verify_reset_otp;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Plain acknowledgement body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    pub message: String,
}
