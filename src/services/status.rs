//! Status check service — lightweight liveness records written by clients.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::ErrorCode;

const MAX_CLIENT_NAME_LEN: usize = 200;
const MAX_LISTED: i64 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("client_name must be 1-200 characters")]
    InvalidClientName,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

impl ErrorCode for StatusError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidClientName => "INVALID_CLIENT_NAME",
            Self::Db(_) => "STORE_FAILED",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Trim and bound-check a client name.
///
/// # Errors
///
/// Returns `StatusError::InvalidClientName` for empty or overlong names.
pub fn normalize_client_name(raw: &str) -> Result<String, StatusError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > MAX_CLIENT_NAME_LEN {
        return Err(StatusError::InvalidClientName);
    }
    Ok(trimmed.to_owned())
}

/// Record a status check.
///
/// # Errors
///
/// Returns a validation or database error.
pub async fn create_status_check(pool: &PgPool, client_name: &str) -> Result<StatusCheck, StatusError> {
    let client_name = normalize_client_name(client_name)?;
    let id = Uuid::new_v4();

    let (timestamp,) = sqlx::query_as::<_, (OffsetDateTime,)>(
        "INSERT INTO status_checks (id, client_name) VALUES ($1, $2) RETURNING created_at",
    )
    .bind(id)
    .bind(&client_name)
    .fetch_one(pool)
    .await?;

    Ok(StatusCheck { id, client_name, timestamp })
}

/// List status checks, oldest first, capped at 1000 rows.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_status_checks(pool: &PgPool) -> Result<Vec<StatusCheck>, StatusError> {
    let rows = sqlx::query_as::<_, (Uuid, String, OffsetDateTime)>(
        "SELECT id, client_name, created_at
         FROM status_checks
         ORDER BY created_at ASC
         LIMIT $1",
    )
    .bind(MAX_LISTED)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, client_name, timestamp)| StatusCheck { id, client_name, timestamp })
        .collect())
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
