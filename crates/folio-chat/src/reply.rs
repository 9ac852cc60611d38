//! Reply synthesis for resolved intents.
//!
//! Composes bot messages without an LLM. Only the projects reply touches the
//! network; every failure there becomes a generic connection-problem message
//! so nothing propagates past this module.

use std::sync::Arc;

use tracing::{debug, warn};

use folio_core::config::FolioConfig;
use folio_core::types::{default_contacts, ContactEntry, RepositorySummary};
use folio_github::catalog::NO_DESCRIPTION;
use folio_github::RepositorySource;

use crate::intent::Intent;
use crate::markup;
use crate::types::Message;

/// Shown when the repository fetch fails for any reason.
pub const CONNECTION_PROBLEM: &str = "Hubo un problema al conectar con GitHub \u{1f6a8}";

/// Shown when the repository list is empty.
pub const NO_PROJECTS: &str = "No encontré proyectos en tu GitHub \u{1f605}";

/// Shown when no intent matched.
pub const NOT_UNDERSTOOD: &str = "No entendí tu pregunta \u{1f914}";

const OWNER_NAME: &str = "Salvador Trenado Hernández";
const OWNER_TAGLINE: &str = "ingeniero en desarrollo y gestión de software \u{1f680}";

/// Default number of repositories listed by the projects reply.
pub const DEFAULT_MAX_PROJECTS: usize = 5;

// =============================================================================
// Reply
// =============================================================================

/// Terminal state of one synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    Succeeded,
    /// The repository fetch failed and the fallback message was used.
    Failed,
}

/// A synthesized message with how it was reached.
#[derive(Debug, Clone)]
pub struct Reply {
    pub message: Message,
    pub outcome: ReplyOutcome,
}

impl Reply {
    fn succeeded(message: Message) -> Self {
        Self {
            message,
            outcome: ReplyOutcome::Succeeded,
        }
    }
}

// =============================================================================
// ReplySynthesizer
// =============================================================================

/// Turns a resolved intent into a bot message.
pub struct ReplySynthesizer {
    source: Arc<dyn RepositorySource>,
    contacts: Vec<ContactEntry>,
    max_projects: usize,
}

impl ReplySynthesizer {
    /// Create a synthesizer with the published contacts and a limit of five
    /// projects.
    pub fn new(source: Arc<dyn RepositorySource>) -> Self {
        Self {
            source,
            contacts: default_contacts(),
            max_projects: DEFAULT_MAX_PROJECTS,
        }
    }

    pub fn from_config(source: Arc<dyn RepositorySource>, config: &FolioConfig) -> Self {
        Self::new(source)
            .with_contacts(config.contacts.clone())
            .with_max_projects(config.chat.max_projects)
    }

    pub fn with_contacts(mut self, contacts: Vec<ContactEntry>) -> Self {
        self.contacts = contacts;
        self
    }

    /// Limit the projects reply. Values below one are raised to one.
    pub fn with_max_projects(mut self, max_projects: usize) -> Self {
        self.max_projects = max_projects.max(1);
        self
    }

    /// Produce the bot message for `intent`.
    pub async fn synthesize(&self, intent: Intent) -> Message {
        self.reply(intent).await.message
    }

    /// Like [`synthesize`](Self::synthesize), also reporting whether the
    /// projects fetch failed.
    pub async fn reply(&self, intent: Intent) -> Reply {
        match intent {
            Intent::Projects => self.projects_reply().await,
            Intent::About => Reply::succeeded(Message::bot_rich(about_markup())),
            Intent::Contact => Reply::succeeded(Message::bot_rich(contact_markup(&self.contacts))),
            Intent::Unresolved => Reply::succeeded(Message::bot(NOT_UNDERSTOOD)),
        }
    }

    async fn projects_reply(&self) -> Reply {
        debug!("Fetching repositories for projects reply");

        match self.source.list_repositories().await {
            Ok(repos) if repos.is_empty() => Reply::succeeded(Message::bot(NO_PROJECTS)),
            Ok(repos) => {
                debug!(
                    available = repos.len(),
                    shown = repos.len().min(self.max_projects),
                    "Rendering projects reply"
                );
                Reply::succeeded(Message::bot_rich(projects_markup(
                    &repos,
                    self.max_projects,
                )))
            }
            Err(e) => {
                warn!(error = %e, rate_limited = e.is_rate_limited(), "Repository fetch failed");
                Reply {
                    message: Message::bot(CONNECTION_PROBLEM),
                    outcome: ReplyOutcome::Failed,
                }
            }
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// First `limit` repositories in the order given, one entry per repository,
/// separated by a blank line.
fn projects_markup(repos: &[RepositorySummary], limit: usize) -> String {
    repos
        .iter()
        .take(limit)
        .map(project_entry)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn project_entry(repo: &RepositorySummary) -> String {
    let mut line = format!("\u{2022} {}", markup::link(&repo.name, &repo.html_url));
    if let Some(language) = repo.language() {
        line.push_str(&format!(" ({})", markup::escape(language)));
    }
    let description = repo.description().unwrap_or(NO_DESCRIPTION);
    format!("{}\n{}", line, markup::escape(description))
}

fn about_markup() -> String {
    format!("Soy {}, {}", markup::bold(OWNER_NAME), OWNER_TAGLINE)
}

fn contact_markup(contacts: &[ContactEntry]) -> String {
    contacts
        .iter()
        .map(|c| format!("{} {}", markup::escape(&c.icon), markup::link(&c.label, &c.url)))
        .collect::<Vec<_>>()
        .join(markup::LINE_BREAK)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use folio_github::{FetchError, MockRepositorySource};

    fn synth(source: MockRepositorySource) -> ReplySynthesizer {
        ReplySynthesizer::new(Arc::new(source))
    }

    fn numbered_repos(n: u64) -> Vec<RepositorySummary> {
        (1..=n)
            .map(|i| RepositorySummary::new(i, &format!("repo-{}", i), &format!("https://gh/r{}", i)))
            .collect()
    }

    // -- Projects --

    #[tokio::test]
    async fn test_projects_empty_list() {
        let msg = synth(MockRepositorySource::empty())
            .synthesize(Intent::Projects)
            .await;
        assert_eq!(msg.body(), NO_PROJECTS);
        assert!(!msg.is_rich_text());
    }

    #[tokio::test]
    async fn test_projects_limited_to_five_in_source_order() {
        let msg = synth(MockRepositorySource::with_repositories(numbered_repos(8)))
            .synthesize(Intent::Projects)
            .await;
        assert!(msg.is_rich_text());

        let entries: Vec<&str> = msg.body().split("\n\n").collect();
        assert_eq!(entries.len(), 5);
        for (i, entry) in entries.iter().enumerate() {
            let name = format!(">repo-{}</a>", i + 1);
            assert!(entry.contains(&name), "entry {} was {}", i, entry);
        }
        assert!(!msg.body().contains("repo-6"));
    }

    #[tokio::test]
    async fn test_projects_entry_format() {
        let repos = vec![RepositorySummary::new(1, "a", "u1")
            .with_language("Go")
            .with_description("Tool")];
        let msg = synth(MockRepositorySource::with_repositories(repos))
            .synthesize(Intent::Projects)
            .await;
        assert_eq!(
            msg.body(),
            "\u{2022} <a href=\"u1\" target=\"_blank\">a</a> (Go)\nTool"
        );
    }

    #[tokio::test]
    async fn test_projects_missing_language_and_description() {
        let repos = vec![RepositorySummary::new(2, "b", "u2")];
        let msg = synth(MockRepositorySource::with_repositories(repos))
            .synthesize(Intent::Projects)
            .await;
        assert_eq!(msg.plain_text(), format!("\u{2022} b\n{}", NO_DESCRIPTION));
        assert!(!msg.body().contains('('));
    }

    #[tokio::test]
    async fn test_projects_escapes_remote_text() {
        let repos = vec![RepositorySummary::new(3, "<img src=x>", "u3")
            .with_description("<script>alert(1)</script>")];
        let msg = synth(MockRepositorySource::with_repositories(repos))
            .synthesize(Intent::Projects)
            .await;
        assert!(!msg.body().contains("<script>"));
        assert!(!msg.body().contains("<img"));
        assert!(msg.plain_text().contains("<script>alert(1)</script>"));
    }

    #[tokio::test]
    async fn test_projects_custom_limit() {
        let synthesizer = synth(MockRepositorySource::with_repositories(numbered_repos(4)))
            .with_max_projects(2);
        let msg = synthesizer.synthesize(Intent::Projects).await;
        assert_eq!(msg.body().split("\n\n").count(), 2);
    }

    #[test]
    fn test_zero_limit_raised_to_one() {
        let synthesizer = synth(MockRepositorySource::empty()).with_max_projects(0);
        assert_eq!(synthesizer.max_projects, 1);
    }

    #[tokio::test]
    async fn test_projects_fetch_failure() {
        for error in [
            FetchError::Transport("dns".to_string()),
            FetchError::Status(403),
            FetchError::Status(500),
            FetchError::NotAnArray,
            FetchError::Decode("eof".to_string()),
        ] {
            let reply = synth(MockRepositorySource::failing(error))
                .reply(Intent::Projects)
                .await;
            assert_eq!(reply.outcome, ReplyOutcome::Failed);
            assert_eq!(reply.message.body(), CONNECTION_PROBLEM);
            assert!(!reply.message.is_rich_text());
        }
    }

    #[tokio::test]
    async fn test_projects_fetches_each_time() {
        let source = Arc::new(MockRepositorySource::empty());
        let synthesizer = ReplySynthesizer::new(source.clone());
        synthesizer.synthesize(Intent::Projects).await;
        synthesizer.synthesize(Intent::Projects).await;
        assert_eq!(source.calls(), 2);
    }

    // -- Static intents --

    #[tokio::test]
    async fn test_about_is_rich_bold_name() {
        let reply = synth(MockRepositorySource::empty()).reply(Intent::About).await;
        assert_eq!(reply.outcome, ReplyOutcome::Succeeded);
        assert!(reply.message.is_rich_text());
        assert!(reply
            .message
            .body()
            .contains("<b>Salvador Trenado Hernández</b>"));
    }

    #[tokio::test]
    async fn test_contact_lines_joined_by_break() {
        let msg = synth(MockRepositorySource::empty())
            .synthesize(Intent::Contact)
            .await;
        assert!(msg.is_rich_text());
        let lines: Vec<&str> = msg.body().split(markup::LINE_BREAK).collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("href=\"mailto:trenadohernandezsalvador@gmail.com\""));
        assert!(lines[0].ends_with(">Email</a>"));
        assert!(lines[2].contains(">GitHub</a>"));
    }

    #[tokio::test]
    async fn test_contact_uses_configured_entries() {
        let msg = synth(MockRepositorySource::empty())
            .with_contacts(vec![ContactEntry::new("Web", "https://example.com", "*")])
            .synthesize(Intent::Contact)
            .await;
        assert_eq!(
            msg.body(),
            "* <a href=\"https://example.com\" target=\"_blank\">Web</a>"
        );
    }

    #[tokio::test]
    async fn test_unresolved_is_plain() {
        let msg = synth(MockRepositorySource::empty())
            .synthesize(Intent::Unresolved)
            .await;
        assert_eq!(msg.body(), NOT_UNDERSTOOD);
        assert!(!msg.is_rich_text());
    }

    #[tokio::test]
    async fn test_static_intents_do_not_fetch() {
        let source = Arc::new(MockRepositorySource::empty());
        let synthesizer = ReplySynthesizer::new(source.clone());
        for intent in [Intent::About, Intent::Contact, Intent::Unresolved] {
            synthesizer.synthesize(intent).await;
        }
        assert_eq!(source.calls(), 0);
    }
}
