//! Project catalog for the portfolio's projects page.
//!
//! Unlike the chat reply, the catalog keeps every repository on the first
//! page and fills in placeholders for missing fields.

use serde::Serialize;
use tracing::info;

use folio_core::types::RepositorySummary;

use crate::error::FetchError;
use crate::RepositorySource;

/// Placeholder for a repository without a description.
pub const NO_DESCRIPTION: &str = "Sin descripción";

/// Placeholder for a repository without a detected language.
pub const NO_LANGUAGE: &str = "No especificado";

/// One card on the projects page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCard {
    pub id: u64,
    pub name: String,
    pub url: String,
    pub description: String,
    pub language: String,
}

impl ProjectCard {
    pub fn from_summary(repo: &RepositorySummary) -> Self {
        Self {
            id: repo.id,
            name: repo.name.clone(),
            url: repo.html_url.clone(),
            description: repo.description().unwrap_or(NO_DESCRIPTION).to_string(),
            language: repo.language().unwrap_or(NO_LANGUAGE).to_string(),
        }
    }
}

/// Loads the projects page from a repository source.
pub struct ProjectCatalog;

impl ProjectCatalog {
    /// Fetch and convert every repository, in host order.
    pub async fn load(source: &dyn RepositorySource) -> Result<Vec<ProjectCard>, FetchError> {
        let repos = source.list_repositories().await?;
        info!(count = repos.len(), "Project catalog loaded");
        Ok(repos.iter().map(ProjectCard::from_summary).collect())
    }
}
