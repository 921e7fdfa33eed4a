//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON API routes live under `/api`. Everything else falls through to the
//! built frontend bundle in `WEBSITE_DIR`, with unknown paths served
//! `index.html` so client-side navigation keeps working on reload.

pub mod contact;
pub mod portfolio;
pub mod status;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes only, without the static site fallback.
pub fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/", get(root))
        .route("/api/portfolio", get(portfolio::get_portfolio))
        .route("/api/portfolio/skills/{tab}", get(portfolio::get_skills))
        .route("/api/portfolio/projects", get(portfolio::list_projects))
        .route("/api/status", get(status::list_status_checks).post(status::create_status_check))
        .route("/api/contact", post(contact::post_contact))
        .route("/api/contact/messages", get(contact::list_messages))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Resolve the directory holding the built frontend.
fn website_dir() -> PathBuf {
    crate::env::env_string("WEBSITE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("website"))
}

/// Full application: API routes plus the static site.
pub fn app(state: AppState) -> Router {
    let website_path = website_dir();
    tracing::info!(path = %website_path.display(), "serving website");

    let website_service = ServeDir::new(&website_path)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(website_path.join("index.html")));

    api_routes(state)
        .fallback_service(website_service)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// `GET /api/` — liveness greeting.
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Hello World" }))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Uniform failure body: `{"ok": false, "error": CODE}`.
pub(crate) fn error_response(status: StatusCode, code: &str) -> Response {
    (status, Json(serde_json::json!({ "ok": false, "error": code }))).into_response()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
