//! Status check routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use super::error_response;
use crate::services::ErrorCode;
use crate::services::status::{self as status_svc, StatusCheckCreate, StatusError};
use crate::state::AppState;

pub(crate) fn status_error_to_status(err: &StatusError) -> StatusCode {
    match err {
        StatusError::InvalidClientName => StatusCode::UNPROCESSABLE_ENTITY,
        StatusError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn status_error_response(err: &StatusError) -> Response {
    if matches!(err, StatusError::Db(_)) {
        tracing::error!(error = %err, "status check query failed");
    }
    error_response(status_error_to_status(err), err.error_code())
}

/// `POST /api/status` — record a status check.
pub async fn create_status_check(State(state): State<AppState>, Json(body): Json<StatusCheckCreate>) -> Response {
    match status_svc::create_status_check(&state.pool, &body.client_name).await {
        Ok(check) => Json(check).into_response(),
        Err(e) => status_error_response(&e),
    }
}

/// `GET /api/status` — list recorded status checks.
pub async fn list_status_checks(State(state): State<AppState>) -> Response {
    match status_svc::list_status_checks(&state.pool).await {
        Ok(checks) => Json(checks).into_response(),
        Err(e) => status_error_response(&e),
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
