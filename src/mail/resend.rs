//! Resend-backed mailer.

use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;

use super::{MailConfig, MailError, Mailer, OutgoingEmail};

pub struct ResendMailer {
    client: Resend,
    from: String,
    to: String,
    subject_prefix: String,
}

impl ResendMailer {
    #[must_use]
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: Resend::new(&config.api_key),
            from: config.from,
            to: config.to,
            subject_prefix: config.subject_prefix,
        }
    }

    /// Build a mailer from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `MailError::NotConfigured` if a required variable is missing.
    pub fn from_env() -> Result<Self, MailError> {
        MailConfig::from_env().map(Self::new)
    }
}

#[async_trait::async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let to = [self.to.as_str()];
        let mut options = CreateEmailBaseOptions::new(&self.from, to, &email.subject)
            .with_text(&email.text)
            .with_html(&email.html);
        if let Some(reply_to) = &email.reply_to {
            options = options.with_reply(reply_to);
        }

        self.client
            .emails
            .send(options)
            .await
            .map_err(|e| MailError::Delivery(e.to_string()))?;
        tracing::debug!(to = %self.to, "contact email accepted by resend");
        Ok(())
    }

    fn subject_prefix(&self) -> &str {
        &self.subject_prefix
    }
}
