//! Portfolio content routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use super::error_response;
use crate::portfolio::{Portfolio, Project, SkillTab};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub tab: SkillTab,
    pub skills: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectQuery {
    pub tag: Option<String>,
}

/// `GET /api/portfolio` — the whole content object.
pub async fn get_portfolio(State(state): State<AppState>) -> Json<Portfolio> {
    Json(state.portfolio.as_ref().clone())
}

/// `GET /api/portfolio/skills/{tab}` — one skills tab.
pub async fn get_skills(State(state): State<AppState>, Path(tab): Path<String>) -> Response {
    let Ok(tab) = tab.parse::<SkillTab>() else {
        return error_response(StatusCode::NOT_FOUND, "UNKNOWN_SKILL_TAB");
    };
    let skills = state.portfolio.skills_for(tab).to_vec();
    Json(SkillsResponse { tab, skills }).into_response()
}

/// `GET /api/portfolio/projects?tag=` — projects, optionally filtered by tag.
pub async fn list_projects(State(state): State<AppState>, Query(query): Query<ProjectQuery>) -> Json<Vec<Project>> {
    let projects = state
        .portfolio
        .projects_tagged(query.tag.as_deref())
        .into_iter()
        .cloned()
        .collect();
    Json(projects)
}

#[cfg(test)]
#[path = "portfolio_test.rs"]
mod tests;
