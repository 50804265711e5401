//! Outbound transactional email.
//!
//! Everything outside the password-reset flow treats mail as a best-effort
//! side effect: callers log failures and carry on.

pub mod messages;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use mockall::automock;
use thiserror::Error;

use crate::secrets::SecretString;

/// SMTP relay settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// Relay host, e.g. `"smtp.gmail.com"`.
    pub host: String,

    pub username: String,

    pub password: SecretString,

    /// Sender address placed in the `From` header.
    pub sender: String,
}

/// A rendered email ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("invalid email address")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build email")]
    Build(#[from] lettre::error::Error),

    #[error("smtp transport error")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), MailerError>;
}

/// SMTP-backed [`Mailer`].
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    /// Build a relay transport from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error when the relay host or sender address is invalid.
    pub fn new(config: SmtpConfig) -> Result<Self, MailerError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .credentials(Credentials::new(
                config.username,
                config.password.expose().to_string(),
            ))
            .build();

        Ok(Self {
            transport,
            sender: config.sender.parse()?,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailerError> {
        let email = Message::builder()
            .from(self.sender.clone())
            .to(message.to.parse()?)
            .subject(message.subject)
            .header(ContentType::TEXT_HTML)
            .body(message.html_body)?;

        self.transport.send(email).await?;

        Ok(())
    }
}
