//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, Claims, CurrentUser, IssuedSession, JwtKeys, NewUser, UserRecord,
        UserRole, UserUuid,
        password::{hash_password, verify_password},
        repository::{NewUserRecord, PgAuthRepository},
    },
    mailer::{Mailer, messages},
};

/// Password-reset codes expire after five minutes.
pub const RESET_CODE_TTL_SECS: i64 = 300;

#[derive(Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    keys: JwtKeys,
    mailer: Arc<dyn Mailer>,
    client_url: String,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, keys: JwtKeys, mailer: Arc<dyn Mailer>, client_url: String) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            keys,
            mailer,
            client_url,
        }
    }

    fn issue_session(&self, user: &UserRecord) -> Result<IssuedSession, AuthServiceError> {
        let token = self
            .keys
            .issue(user.uuid, user.role, Timestamp::now())
            .map_err(AuthServiceError::Token)?;

        Ok(IssuedSession {
            token,
            user: user.into(),
        })
    }

    /// Fetch the newest valid code for `email`, deleting it when expired.
    async fn valid_otp(
        &self,
        email: &str,
        code: &str,
    ) -> Result<crate::auth::OtpRecord, AuthServiceError> {
        let record = self
            .repository
            .latest_otp(email)
            .await?
            .ok_or(AuthServiceError::InvalidOtp)?;

        let age_secs = Timestamp::now().as_second() - record.created_at.as_second();
        if age_secs > RESET_CODE_TTL_SECS {
            self.repository.delete_otp(record.uuid).await?;

            return Err(AuthServiceError::InvalidOtp);
        }

        if record.code != code {
            return Err(AuthServiceError::InvalidOtp);
        }

        Ok(record)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn signup(&self, new_user: NewUser) -> Result<IssuedSession, AuthServiceError> {
        validate_new_user(&new_user)?;

        let password_hash =
            hash_password(&new_user.password).map_err(AuthServiceError::PasswordHash)?;

        let user = self
            .repository
            .create_user(&NewUserRecord {
                uuid: UserUuid::new(),
                name: new_user.name.trim().to_string(),
                email: new_user.email.trim().to_lowercase(),
                phone: new_user.phone,
                organization: new_user.organization.trim().to_string(),
                password_hash,
                role: UserRole::User,
            })
            .await?;

        self.issue_session(&user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError> {
        let user = self
            .repository
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AuthServiceError::InvalidCredentials);
        }

        self.issue_session(&user)
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<CurrentUser, AuthServiceError> {
        let claims: Claims = self
            .keys
            .decode(bearer_token)
            .map_err(|_| AuthServiceError::InvalidToken)?;

        let uuid = Uuid::try_parse(&claims.sub).map_err(|_| AuthServiceError::InvalidToken)?;

        let user = self
            .repository
            .find_by_uuid(UserUuid::from_uuid(uuid))
            .await?
            .ok_or(AuthServiceError::InvalidToken)?;

        Ok(CurrentUser::from(&user))
    }

    async fn current_user(&self, user: UserUuid) -> Result<CurrentUser, AuthServiceError> {
        self.repository
            .find_by_uuid(user)
            .await?
            .map(|record| CurrentUser::from(&record))
            .ok_or(AuthServiceError::NotFound)
    }

    async fn forgot_password(&self, email: &str) -> Result<(), AuthServiceError> {
        let email = email.trim().to_lowercase();

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        self.repository.delete_otps_for(&email).await?;

        let code = generate_reset_code();
        self.repository
            .create_otp(Uuid::now_v7(), &email, &code)
            .await?;

        let reset_link = format!(
            "{}/reset-password?email={email}&otp={code}",
            self.client_url.trim_end_matches('/'),
        );

        // The email *is* the operation here, so a send failure is surfaced.
        self.mailer
            .send(messages::password_reset(&user.email, &code, &reset_link))
            .await?;

        Ok(())
    }

    async fn verify_reset_otp(&self, email: &str, code: &str) -> Result<(), AuthServiceError> {
        self.valid_otp(&email.trim().to_lowercase(), code)
            .await
            .map(|_record| ())
    }

    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), AuthServiceError> {
        validate_password(new_password)?;

        let email = email.trim().to_lowercase();
        let record = self.valid_otp(&email, code).await?;

        let password_hash = hash_password(new_password).map_err(AuthServiceError::PasswordHash)?;

        let rows_affected = self.repository.update_password(&email, &password_hash).await?;
        if rows_affected == 0 {
            return Err(AuthServiceError::NotFound);
        }

        self.repository.delete_otp(record.uuid).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account and issue a session token.
    async fn signup(&self, new_user: NewUser) -> Result<IssuedSession, AuthServiceError>;

    /// Authenticate by email and password and issue a session token.
    async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a bearer token to the account it identifies.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<CurrentUser, AuthServiceError>;

    /// Fetch the profile for an authenticated account.
    async fn current_user(&self, user: UserUuid) -> Result<CurrentUser, AuthServiceError>;

    /// Create a password-reset code and email it to the account holder.
    async fn forgot_password(&self, email: &str) -> Result<(), AuthServiceError>;

    /// Check a reset code without consuming it.
    async fn verify_reset_otp(&self, email: &str, code: &str) -> Result<(), AuthServiceError>;

    /// Consume a reset code and set a new password.
    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), AuthServiceError>;
}

/// Seed an admin account (operator CLI).
///
/// # Errors
///
/// Returns an error when validation fails or the email is already taken.
pub async fn create_admin_user(
    pool: &PgPool,
    admin: NewUser,
) -> Result<UserRecord, AuthServiceError> {
    validate_new_user(&admin)?;

    let password_hash = hash_password(&admin.password).map_err(AuthServiceError::PasswordHash)?;

    let repository = PgAuthRepository::new(pool.clone());

    Ok(repository
        .create_user(&NewUserRecord {
            uuid: UserUuid::new(),
            name: admin.name.trim().to_string(),
            email: admin.email.trim().to_lowercase(),
            phone: admin.phone,
            organization: admin.organization.trim().to_string(),
            password_hash,
            role: UserRole::Admin,
        })
        .await?)
}

/// Grant an existing account the admin role (operator CLI).
///
/// # Errors
///
/// Returns [`AuthServiceError::NotFound`] when no account uses `email`.
pub async fn promote_user(pool: &PgPool, email: &str) -> Result<UserRecord, AuthServiceError> {
    let repository = PgAuthRepository::new(pool.clone());

    repository
        .set_role(&email.trim().to_lowercase(), UserRole::Admin)
        .await?
        .ok_or(AuthServiceError::NotFound)
}

fn generate_reset_code() -> String {
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}

fn validate_new_user(user: &NewUser) -> Result<(), AuthServiceError> {
    let name_len = user.name.trim().chars().count();
    if !(2..=50).contains(&name_len) {
        return Err(AuthServiceError::Invalid("name must be 2-50 characters"));
    }

    if !is_plausible_email(user.email.trim()) {
        return Err(AuthServiceError::Invalid("a valid email is required"));
    }

    validate_password(&user.password)?;

    if !(10..=15).contains(&user.phone.len()) || !user.phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AuthServiceError::Invalid(
            "phone number must be 10-15 digits",
        ));
    }

    let organization_len = user.organization.trim().chars().count();
    if !(2..=100).contains(&organization_len) {
        return Err(AuthServiceError::Invalid(
            "organization must be 2-100 characters",
        ));
    }

    Ok(())
}

fn validate_password(password: &str) -> Result<(), AuthServiceError> {
    if password.chars().count() < 6 {
        return Err(AuthServiceError::Invalid(
            "password must be at least 6 characters",
        ));
    }

    Ok(())
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{mailer::MockMailer, test::TestContext};

    use super::*;

    fn valid_signup(email: &str) -> NewUser {
        NewUser {
            name: "Asha Rao".to_string(),
            email: email.to_string(),
            password: "secret-pass".to_string(),
            phone: "9876543210".to_string(),
            organization: "Rao Associates".to_string(),
        }
    }

    #[test]
    fn validation_rejects_bad_fields() {
        let cases = [
            NewUser {
                name: "A".to_string(),
                ..valid_signup("a@example.com")
            },
            NewUser {
                email: "not-an-email".to_string(),
                ..valid_signup("a@example.com")
            },
            NewUser {
                password: "short".to_string(),
                ..valid_signup("a@example.com")
            },
            NewUser {
                phone: "12ab".to_string(),
                ..valid_signup("a@example.com")
            },
            NewUser {
                organization: "x".to_string(),
                ..valid_signup("a@example.com")
            },
        ];

        for case in cases {
            assert!(
                matches!(validate_new_user(&case), Err(AuthServiceError::Invalid(_))),
                "expected validation failure for {case:?}"
            );
        }
    }

    #[test]
    fn generated_codes_are_six_digits() {
        for _attempt in 0..32 {
            let code = generate_reset_code();

            assert_eq!(code.len(), 6, "code {code} should be six digits");
            assert!(code.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[tokio::test]
    async fn signup_then_login_round_trip() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = ctx.auth();

        let session = auth.signup(valid_signup("asha@example.com")).await?;
        assert_eq!(session.user.email, "asha@example.com");
        assert_eq!(session.user.role, UserRole::User);

        let login = auth.login("asha@example.com", "secret-pass").await?;
        assert_eq!(login.user.uuid, session.user.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn signup_duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = ctx.auth();

        auth.signup(valid_signup("dup@example.com")).await?;
        let result = auth.signup(valid_signup("dup@example.com")).await;

        assert!(
            matches!(result, Err(AuthServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_with_wrong_password_fails() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = ctx.auth();

        auth.signup(valid_signup("asha@example.com")).await?;
        let result = auth.login("asha@example.com", "wrong-pass").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn authenticate_bearer_round_trip() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = ctx.auth();

        let session = auth.signup(valid_signup("asha@example.com")).await?;
        let current = auth.authenticate_bearer(&session.token).await?;

        assert_eq!(current.uuid, session.user.uuid);
        assert_eq!(current.role, UserRole::User);

        Ok(())
    }

    #[tokio::test]
    async fn authenticate_bearer_rejects_garbage() {
        let ctx = TestContext::new().await;
        let auth = ctx.auth();

        let result = auth.authenticate_bearer("garbage.token.value").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidToken)),
            "expected InvalidToken, got {result:?}"
        );
    }

    #[tokio::test]
    async fn forgot_password_unknown_email_is_not_found() {
        let ctx = TestContext::new().await;
        let auth = ctx.auth();

        let result = auth.forgot_password("nobody@example.com").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn forgot_then_reset_password_flow() -> TestResult {
        let ctx = TestContext::new().await;

        let mut mailer = MockMailer::new();
        mailer.expect_send().once().returning(|_message| Ok(()));

        let auth = ctx.auth_with_mailer(std::sync::Arc::new(mailer));

        auth.signup(valid_signup("asha@example.com")).await?;
        auth.forgot_password("asha@example.com").await?;

        let code = ctx.latest_otp_code("asha@example.com").await;

        auth.verify_reset_otp("asha@example.com", &code).await?;
        auth.reset_password("asha@example.com", &code, "new-secret")
            .await?;

        // Old password no longer works; the new one does.
        assert!(auth.login("asha@example.com", "secret-pass").await.is_err());
        auth.login("asha@example.com", "new-secret").await?;

        // The code was consumed.
        let result = auth.verify_reset_otp("asha@example.com", &code).await;
        assert!(
            matches!(result, Err(AuthServiceError::InvalidOtp)),
            "expected InvalidOtp after consumption, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn wrong_reset_code_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let mut mailer = MockMailer::new();
        mailer.expect_send().once().returning(|_message| Ok(()));

        let auth = ctx.auth_with_mailer(std::sync::Arc::new(mailer));

        auth.signup(valid_signup("asha@example.com")).await?;
        auth.forgot_password("asha@example.com").await?;

        let result = auth.verify_reset_otp("asha@example.com", "000000").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidOtp)),
            "expected InvalidOtp, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_reset_code_is_rejected_and_deleted() -> TestResult {
        let ctx = TestContext::new().await;

        let mut mailer = MockMailer::new();
        mailer.expect_send().once().returning(|_message| Ok(()));

        let auth = ctx.auth_with_mailer(std::sync::Arc::new(mailer));

        auth.signup(valid_signup("asha@example.com")).await?;
        auth.forgot_password("asha@example.com").await?;

        let code = ctx.latest_otp_code("asha@example.com").await;

        sqlx::query("UPDATE password_otps SET created_at = now() - interval '10 minutes'")
            .execute(ctx.pool())
            .await?;

        let result = auth.verify_reset_otp("asha@example.com", &code).await;
        assert!(
            matches!(result, Err(AuthServiceError::InvalidOtp)),
            "expected InvalidOtp for expired code, got {result:?}"
        );

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM password_otps")
            .fetch_one(ctx.pool())
            .await?;
        assert_eq!(remaining, 0, "expired code should be deleted");

        Ok(())
    }

    #[tokio::test]
    async fn create_admin_and_promote() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = ctx.auth();

        let admin = create_admin_user(ctx.pool(), valid_signup("admin@example.com")).await?;
        assert_eq!(admin.role, UserRole::Admin);

        auth.signup(valid_signup("user@example.com")).await?;
        let promoted = promote_user(ctx.pool(), "user@example.com").await?;
        assert_eq!(promoted.role, UserRole::Admin);

        let missing = promote_user(ctx.pool(), "nobody@example.com").await;
        assert!(
            matches!(missing, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {missing:?}"
        );

        Ok(())
    }
}
