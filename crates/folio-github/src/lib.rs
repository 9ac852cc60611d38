//! Repository listing for the portfolio.
//!
//! Provides the `RepositorySource` trait, a `GithubClient` that reads the
//! public repository list over the GitHub REST API, a `MockRepositorySource`
//! for testing, and the project catalog shown on the projects page.

pub mod catalog;
pub mod client;
pub mod error;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use folio_core::types::RepositorySummary;

pub use catalog::{ProjectCard, ProjectCatalog};
pub use client::{parse_repositories, GithubClient};
pub use error::FetchError;

/// Source of repository summaries.
///
/// Implementations fetch fresh data on every call; nothing is cached.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// List repositories in the order the host returns them.
    async fn list_repositories(&self) -> Result<Vec<RepositorySummary>, FetchError>;
}

/// Mock repository source for testing.
///
/// Replays a canned response and counts how often it was asked.
#[derive(Debug)]
pub struct MockRepositorySource {
    response: Result<Vec<RepositorySummary>, FetchError>,
    calls: AtomicUsize,
}

impl MockRepositorySource {
    /// A source that returns the given repositories.
    pub fn with_repositories(repos: Vec<RepositorySummary>) -> Self {
        Self {
            response: Ok(repos),
            calls: AtomicUsize::new(0),
        }
    }

    /// A source that returns an empty list.
    pub fn empty() -> Self {
        Self::with_repositories(Vec::new())
    }

    /// A source that always fails with `error`.
    pub fn failing(error: FetchError) -> Self {
        Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `list_repositories` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockRepositorySource {
    fn default() -> Self {
        Self::empty()
    }
}

#[async_trait]
impl RepositorySource for MockRepositorySource {
    async fn list_repositories(&self) -> Result<Vec<RepositorySummary>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}
