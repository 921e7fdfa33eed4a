//! Portfolio content — the profile, skills, certifications, experience and
//! projects rendered by the site.
//!
//! DESIGN
//! ======
//! Content is hand-authored and immutable for the life of the process. It is
//! either the built-in default (see `content.rs`) or a YAML file named by
//! `PORTFOLIO_FILE`. Both paths go through `Portfolio::validate` so a typo in
//! the YAML fails at startup instead of rendering a broken page.

mod content;

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::services::contact::normalize_email;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("failed to read portfolio file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("failed to parse portfolio yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid portfolio content: {0}")]
    Invalid(String),
}

// =============================================================================
// CONTENT TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub intro: String,
    pub location: String,
    pub resume_url: String,
    pub email: String,
    #[serde(default)]
    pub socials: Socials,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Socials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub primary: Vec<String>,
    #[serde(default)]
    pub secondary: Vec<String>,
}

/// The two tabs of the skills section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillTab {
    Primary,
    Secondary,
}

impl FromStr for SkillTab {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            other => Err(PortfolioError::Invalid(format!("unknown skill tab: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub valid_till: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub period: String,
    pub summary: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_project_link")]
    pub link: String,
}

fn default_project_link() -> String {
    "#".to_owned()
}

impl Project {
    /// Case-insensitive tag membership.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.trim();
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(needle))
    }
}

// =============================================================================
// PORTFOLIO
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Portfolio {
    /// The hand-authored default content.
    #[must_use]
    pub fn builtin() -> Self {
        content::builtin()
    }

    /// Parse and validate YAML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or fails validation.
    pub fn from_yaml_str(raw: &str) -> Result<Self, PortfolioError> {
        let portfolio: Self = serde_yaml::from_str(raw)?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    /// Load content from a YAML file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, PortfolioError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| PortfolioError::Read { path: path.display().to_string(), source })?;
        Self::from_yaml_str(&raw)
    }

    /// Load from `PORTFOLIO_FILE` when set, else fall back to the built-in content.
    ///
    /// # Errors
    ///
    /// Returns an error only when `PORTFOLIO_FILE` is set and unusable.
    pub fn from_env() -> Result<Self, PortfolioError> {
        match crate::env::env_string("PORTFOLIO_FILE") {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::builtin()),
        }
    }

    /// Check the content renders correctly.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::Invalid` describing the first problem found.
    pub fn validate(&self) -> Result<(), PortfolioError> {
        if self.profile.name.trim().is_empty() {
            return Err(PortfolioError::Invalid("profile name is empty".into()));
        }
        if self.profile.title.trim().is_empty() {
            return Err(PortfolioError::Invalid("profile title is empty".into()));
        }
        if normalize_email(&self.profile.email).is_none() {
            return Err(PortfolioError::Invalid(format!("profile email is invalid: {}", self.profile.email)));
        }

        for tab in [SkillTab::Primary, SkillTab::Secondary] {
            if self.skills_for(tab).iter().any(|s| s.trim().is_empty()) {
                return Err(PortfolioError::Invalid(format!("{tab:?} skills contain an empty entry")));
            }
        }

        let mut seen = HashSet::new();
        for project in &self.projects {
            let name = project.name.trim();
            if name.is_empty() {
                return Err(PortfolioError::Invalid("project name is empty".into()));
            }
            if !seen.insert(name.to_ascii_lowercase()) {
                return Err(PortfolioError::Invalid(format!("duplicate project name: {name}")));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn skills_for(&self, tab: SkillTab) -> &[String] {
        match tab {
            SkillTab::Primary => &self.skills.primary,
            SkillTab::Secondary => &self.skills.secondary,
        }
    }

    /// Projects in authored order, optionally narrowed to those carrying `tag`.
    #[must_use]
    pub fn projects_tagged(&self, tag: Option<&str>) -> Vec<&Project> {
        match tag.map(str::trim).filter(|t| !t.is_empty()) {
            Some(tag) => self.projects.iter().filter(|p| p.has_tag(tag)).collect(),
            None => self.projects.iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
