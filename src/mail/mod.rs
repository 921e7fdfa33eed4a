//! Mail — outbound delivery of contact form messages.
//!
//! DESIGN
//! ======
//! The `Mailer` trait is the seam between the contact service and the
//! delivery provider. Production uses `ResendMailer`; tests inject a mock.
//! Delivery is optional: when `MailConfig::from_env` fails the server runs
//! without a mailer and contact messages are only stored.

pub mod config;
pub mod resend;

pub use config::MailConfig;
pub use resend::ResendMailer;

/// A fully rendered email, ready for a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
    /// Address replies should go to (the visitor who filled in the form).
    pub reply_to: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail not configured: missing {var}")]
    NotConfigured { var: String },
    #[error("email delivery failed: {0}")]
    Delivery(String),
}

/// Outbound mail transport.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver `email` to the configured recipient.
    ///
    /// # Errors
    ///
    /// Returns `MailError::Delivery` if the provider rejects the message.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;

    /// Subject prefix used when rendering contact emails.
    fn subject_prefix(&self) -> &str;
}
