//! Mail configuration parsed from environment variables.

use super::MailError;
use crate::env::env_string;

pub const DEFAULT_SUBJECT_PREFIX: &str = "[Portfolio]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub api_key: String,
    pub from: String,
    pub to: String,
    pub subject_prefix: String,
}

impl MailConfig {
    /// Build typed mail config from environment variables.
    ///
    /// Required:
    /// - `RESEND_API_KEY`
    /// - `CONTACT_FROM`: verified sender address
    /// - `CONTACT_TO`: inbox receiving contact messages
    ///
    /// Optional:
    /// - `CONTACT_SUBJECT_PREFIX`: default `[Portfolio]`
    ///
    /// # Errors
    ///
    /// Returns `MailError::NotConfigured` naming the first missing variable.
    pub fn from_env() -> Result<Self, MailError> {
        let api_key = require("RESEND_API_KEY")?;
        let from = require("CONTACT_FROM")?;
        let to = require("CONTACT_TO")?;
        let subject_prefix = env_string("CONTACT_SUBJECT_PREFIX").unwrap_or_else(|| DEFAULT_SUBJECT_PREFIX.to_owned());

        Ok(Self { api_key, from, to, subject_prefix })
    }
}

fn require(var: &str) -> Result<String, MailError> {
    env_string(var).ok_or_else(|| MailError::NotConfigured { var: var.to_owned() })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
