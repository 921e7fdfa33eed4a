//! Contact form routes.
//!
//! The service is expected to run behind exactly one reverse proxy that sets
//! `X-Real-IP` and appends the peer address to `X-Forwarded-For`. Anything
//! left of the last `X-Forwarded-For` entry comes from the client and is not
//! used for rate limiting.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::error_response;
use crate::services::ErrorCode;
use crate::services::contact::{self as contact_svc, ContactError, ContactOutcome, ContactSubmission};
use crate::state::AppState;

const ANONYMOUS_CLIENT: &str = "anonymous";
const DEFAULT_LIST_LIMIT: i64 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Client identity for rate limiting: `X-Real-IP`, then the last
/// `X-Forwarded-For` entry (the one our proxy appended), then a shared
/// anonymous bucket.
pub(crate) fn client_key(headers: &HeaderMap) -> String {
    let forwarded = || {
        header_str(headers, "x-forwarded-for")
            .and_then(|v| v.rsplit(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header_str(headers, "x-real-ip")
        .or_else(forwarded)
        .unwrap_or(ANONYMOUS_CLIENT)
        .to_owned()
}

pub(crate) fn contact_error_to_status(err: &ContactError) -> StatusCode {
    match err {
        ContactError::InvalidName | ContactError::InvalidEmail | ContactError::InvalidMessage => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ContactError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        ContactError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ContactError::Mail(_) => StatusCode::BAD_GATEWAY,
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}

/// Compare tokens through their SHA-256 digests without short-circuiting, so
/// the time taken does not depend on where the inputs first differ.
pub(crate) fn tokens_match(presented: &str, expected: &str) -> bool {
    let presented = Sha256::digest(presented.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    presented
        .iter()
        .zip(expected.iter())
        .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// `POST /api/contact` — accept a contact form submission.
pub async fn post_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ContactSubmission>,
) -> Response {
    let client = client_key(&headers);
    match contact_svc::submit(&state, &body, &client).await {
        Ok(ContactOutcome::Delivered) => Json(serde_json::json!({ "ok": true, "message": "Email sent" })).into_response(),
        Ok(ContactOutcome::Saved) => Json(serde_json::json!({ "ok": true, "message": "Message saved" })).into_response(),
        Err(e) => {
            match &e {
                ContactError::RateLimited(_) => tracing::warn!(%client, error = %e, "contact submission rate limited"),
                ContactError::Db(_) => tracing::error!(%client, error = %e, "contact submission not stored"),
                _ => tracing::debug!(%client, error = %e, "contact submission rejected"),
            }
            error_response(contact_error_to_status(&e), e.error_code())
        }
    }
}

/// `GET /api/contact/messages?limit=` — stored messages, newest first.
///
/// Hidden (404) unless `ADMIN_TOKEN` is configured; requires it as a bearer token.
pub async fn list_messages(State(state): State<AppState>, headers: HeaderMap, Query(query): Query<ListQuery>) -> Response {
    let Some(expected) = state.admin_token.as_deref() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if !bearer_token(&headers).is_some_and(|token| tokens_match(token, expected)) {
        return error_response(StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
    }

    match contact_svc::list_messages(&state.pool, query.limit.unwrap_or(DEFAULT_LIST_LIMIT)).await {
        Ok(messages) => Json(messages).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "contact message listing failed");
            error_response(contact_error_to_status(&e), e.error_code())
        }
    }
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;
