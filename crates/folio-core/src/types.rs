use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Remote records
// =============================================================================

/// Minimal projection of a repository record returned by the GitHub
/// `GET /users/{account}/repos` endpoint.
///
/// Fields not listed here are ignored during deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    /// GitHub numeric repository id.
    pub id: u64,
    /// Repository name (link text in replies).
    pub name: String,
    /// Browser URL of the repository.
    pub html_url: String,
    /// Free-text description; GitHub sends `null` when unset.
    #[serde(default)]
    pub description: Option<String>,
    /// Primary language detected by GitHub.
    #[serde(default)]
    pub language: Option<String>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub private: bool,
}

impl RepositorySummary {
    /// Build a public summary with only the fields the chat reply needs.
    pub fn new(id: u64, name: &str, html_url: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            html_url: html_url.to_string(),
            description: None,
            language: None,
            updated_at: None,
            private: false,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    /// Description with blank strings treated as missing.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }

    /// Language with blank strings treated as missing.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref().filter(|l| !l.trim().is_empty())
    }
}

// =============================================================================
// Static records
// =============================================================================

/// One way to reach the site owner, shown by the contact reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEntry {
    pub label: String,
    pub url: String,
    pub icon: String,
}

impl ContactEntry {
    pub fn new(label: &str, url: &str, icon: &str) -> Self {
        Self {
            label: label.to_string(),
            url: url.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// The contact list published on the portfolio, in display order.
pub fn default_contacts() -> Vec<ContactEntry> {
    vec![
        ContactEntry::new(
            "Email",
            "mailto:trenadohernandezsalvador@gmail.com",
            "\u{1f4e7}",
        ),
        ContactEntry::new(
            "LinkedIn",
            "https://www.linkedin.com/in/salvador-trenado-5995942aa/",
            "\u{1f517}",
        ),
        ContactEntry::new("GitHub", "https://github.com/tore234", "\u{1f4bb}"),
    ]
}

// =============================================================================
// Tests
// =============================================================================
