//! Contact service — validation, storage and delivery of contact form messages.
//!
//! DESIGN
//! ======
//! Every accepted submission is written to `contact_messages` before any
//! delivery attempt, so a provider outage never loses a message. Delivery is
//! best-effort on top of that: when no mailer is configured the message is
//! only stored, and a failed send leaves `delivered = false` for later review
//! through the admin listing.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::ErrorCode;
use crate::mail::{MailError, Mailer, OutgoingEmail};
use crate::rate_limit::RateLimitError;
use crate::state::AppState;

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_MESSAGE_LEN: usize = 5000;
const MAX_EMAIL_LEN: usize = 254;
pub const MAX_LIST_LIMIT: i64 = 500;
const LOCAL_PART_SYMBOLS: &str = "!#$%&'*+/=?^_`{|}~.-";
const CONTACT_EMAIL_TEMPLATE: &str = include_str!("../../templates/contact_email.html");

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("name must be 1-200 characters")]
    InvalidName,
    #[error("invalid email")]
    InvalidEmail,
    #[error("message must be 1-5000 characters")]
    InvalidMessage,
    #[error(transparent)]
    RateLimited(#[from] RateLimitError),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error(transparent)]
    Mail(#[from] MailError),
}

impl ErrorCode for ContactError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidMessage => "INVALID_MESSAGE",
            Self::RateLimited(_) => "RATE_LIMITED",
            Self::Db(_) => "STORE_FAILED",
            Self::Mail(_) => "MAIL_SEND_FAILED",
        }
    }
}

/// Raw contact form body.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A submission that passed validation: trimmed, email lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A stored contact message.
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub delivered: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// What happened to an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Stored and emailed.
    Delivered,
    /// Stored only; no mailer is configured.
    Saved,
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Normalize an address to lower case, or `None` if it is not a plausible email.
///
/// Accepts `local@domain.tld` where the local part is dot-atom text and the
/// domain has at least two non-empty alphanumeric/hyphen labels.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || normalized.len() > MAX_EMAIL_LEN {
        return None;
    }

    let (local, domain) = normalized.split_once('@')?;
    if !is_valid_local_part(local) || !is_valid_domain(domain) {
        return None;
    }
    Some(normalized)
}

fn is_valid_local_part(local: &str) -> bool {
    !local.is_empty()
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || LOCAL_PART_SYMBOLS.contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels = domain.split('.').collect::<Vec<_>>();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

fn bounded(value: &str, max_chars: usize) -> Option<String> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    (1..=max_chars).contains(&len).then(|| trimmed.to_owned())
}

impl ContactSubmission {
    /// Validate and normalize the submission.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field, checked in form order.
    pub fn validate(&self) -> Result<ValidContact, ContactError> {
        let name = bounded(&self.name, MAX_NAME_LEN).ok_or(ContactError::InvalidName)?;
        let email = normalize_email(&self.email).ok_or(ContactError::InvalidEmail)?;
        let message = bounded(&self.message, MAX_MESSAGE_LEN).ok_or(ContactError::InvalidMessage)?;
        Ok(ValidContact { name, email, message })
    }
}

// =============================================================================
// RENDERING
// =============================================================================

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Substitute `{{KEY}}` placeholders in one pass. Inserted values are never
/// rescanned, so visitor text cannot expand into other placeholders.
/// Unknown placeholders are left as written.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

/// Render the notification email sent to the site owner.
#[must_use]
pub fn render_contact_email(subject_prefix: &str, contact: &ValidContact) -> OutgoingEmail {
    let subject = format!("{subject_prefix} New contact from {}", contact.name);
    let text = format!(
        "Name: {}\nEmail: {}\n\nMessage:\n{}",
        contact.name, contact.email, contact.message
    );
    let name = escape_html(&contact.name);
    let email = escape_html(&contact.email);
    let message = escape_html(&contact.message).replace('\n', "<br>\n");
    let html = fill_template(
        CONTACT_EMAIL_TEMPLATE,
        &[("NAME", name.as_str()), ("EMAIL", email.as_str()), ("MESSAGE", message.as_str())],
    );

    OutgoingEmail { subject, text, html, reply_to: Some(contact.email.clone()) }
}

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Store a validated message. `client` is the rate-limit identity of the sender.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn store_message(pool: &PgPool, contact: &ValidContact, client: &str) -> Result<ContactMessage, ContactError> {
    let id = Uuid::new_v4();
    let (created_at,) = sqlx::query_as::<_, (OffsetDateTime,)>(
        r"INSERT INTO contact_messages (id, name, email, message, client)
          VALUES ($1, $2, $3, $4, $5)
          RETURNING created_at",
    )
    .bind(id)
    .bind(&contact.name)
    .bind(&contact.email)
    .bind(&contact.message)
    .bind(client)
    .fetch_one(pool)
    .await?;

    Ok(ContactMessage {
        id,
        name: contact.name.clone(),
        email: contact.email.clone(),
        message: contact.message.clone(),
        delivered: false,
        created_at,
    })
}

/// Flag a stored message as emailed.
///
/// # Errors
///
/// Returns a database error if the update fails.
pub async fn mark_delivered(pool: &PgPool, id: Uuid) -> Result<(), ContactError> {
    sqlx::query("UPDATE contact_messages SET delivered = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Stored messages, newest first. `limit` is clamped to `1..=MAX_LIST_LIMIT`.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_messages(pool: &PgPool, limit: i64) -> Result<Vec<ContactMessage>, ContactError> {
    let rows = sqlx::query_as::<_, (Uuid, String, String, String, bool, OffsetDateTime)>(
        "SELECT id, name, email, message, delivered, created_at
         FROM contact_messages
         ORDER BY created_at DESC, id DESC
         LIMIT $1",
    )
    .bind(limit.clamp(1, MAX_LIST_LIMIT))
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name, email, message, delivered, created_at)| ContactMessage {
            id,
            name,
            email,
            message,
            delivered,
            created_at,
        })
        .collect())
}

// =============================================================================
// SUBMISSION FLOW
// =============================================================================

/// Render and send the owner notification for `contact`.
///
/// # Errors
///
/// Returns `ContactError::Mail` if the provider rejects the message.
pub async fn deliver(mailer: &dyn Mailer, contact: &ValidContact) -> Result<(), ContactError> {
    let email = render_contact_email(mailer.subject_prefix(), contact);
    mailer.send(&email).await?;
    Ok(())
}

/// Validate, rate limit, store and (when configured) email a submission.
///
/// # Errors
///
/// Validation and rate-limit failures happen before anything is stored.
/// A mail failure is returned after the message has been stored.
pub async fn submit(
    state: &AppState,
    submission: &ContactSubmission,
    client: &str,
) -> Result<ContactOutcome, ContactError> {
    let contact = submission.validate()?;
    state.rate_limiter.check_and_record(client)?;

    let stored = store_message(&state.pool, &contact, client).await?;
    tracing::info!(message_id = %stored.id, %client, "contact message stored");

    let Some(mailer) = &state.mailer else {
        return Ok(ContactOutcome::Saved);
    };

    if let Err(e) = deliver(mailer.as_ref(), &contact).await {
        tracing::error!(message_id = %stored.id, error = %e, "contact email delivery failed");
        return Err(e);
    }

    if let Err(e) = mark_delivered(&state.pool, stored.id).await {
        tracing::warn!(message_id = %stored.id, error = %e, "failed to flag contact message as delivered");
    }
    Ok(ContactOutcome::Delivered)
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;
