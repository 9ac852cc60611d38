//! GitHub REST client for the public repository list.
//!
//! Issues one unauthenticated `GET {api_base}/users/{account}/repos` per call.
//! Only the first page is read. Rate-limit responses (403/429) are reported
//! like any other non-success status.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use folio_core::config::GithubConfig;
use folio_core::types::RepositorySummary;

use crate::error::FetchError;
use crate::RepositorySource;

/// Media type recommended by the GitHub REST API.
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Repository source backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    repos_url: String,
    http: reqwest::Client,
}

impl GithubClient {
    /// Build a client from configuration.
    ///
    /// No timeout is applied unless `request_timeout_secs` is set.
    pub fn new(config: &GithubConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            repos_url: repos_url(&config.api_base_url, &config.account),
            http,
        })
    }

    /// Endpoint this client reads from.
    pub fn repos_url(&self) -> &str {
        &self.repos_url
    }
}

#[async_trait]
impl RepositorySource for GithubClient {
    async fn list_repositories(&self) -> Result<Vec<RepositorySummary>, FetchError> {
        debug!(url = %self.repos_url, "Fetching repository list");

        let response = self
            .http
            .get(&self.repos_url)
            .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        let repos = parse_repositories(status, &body)?;
        debug!(count = repos.len(), "Repository list fetched");
        Ok(repos)
    }
}

/// Classify a repository-list response.
///
/// A non-2xx status wins over the body. A well-formed body that is not a
/// JSON array (GitHub sends an object for errors) is `NotAnArray`.
pub fn parse_repositories(status: u16, body: &str) -> Result<Vec<RepositorySummary>, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Status(status));
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    if !value.is_array() {
        return Err(FetchError::NotAnArray);
    }

    serde_json::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))
}

fn repos_url(api_base_url: &str, account: &str) -> String {
    format!("{}/users/{}/repos", api_base_url.trim_end_matches('/'), account)
}
