//! Bearer token (JWT) issue and verification.

use std::fmt;

use jiff::Timestamp;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    auth::models::{UserRole, UserUuid},
    secrets::SecretString,
};

/// Token lifetime: seven days.
pub const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user UUID.
    pub sub: String,

    /// Account role at issue time.
    pub role: String,

    pub iat: i64,

    pub exp: i64,
}

/// Signing and verification keys derived from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.expose().as_bytes()),
            decoding: DecodingKey::from_secret(secret.expose().as_bytes()),
        }
    }

    /// Issue a token for `user` valid from `now`.
    ///
    /// # Errors
    ///
    /// Returns an error when token serialization fails.
    pub fn issue(
        &self,
        user: UserUuid,
        role: UserRole,
        now: Timestamp,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: user.to_string(),
            role: role.as_str().to_string(),
            iat: now.as_second(),
            exp: now.as_second() + TOKEN_TTL_SECS,
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
    }

    /// Decode and validate a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed, mis-signed, or expired tokens.
    pub fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
    }
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtKeys(**redacted**)")
    }
}
