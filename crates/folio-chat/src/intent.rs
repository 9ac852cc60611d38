//! Keyword intent resolver.
//!
//! Maps a free-text utterance to one of a closed set of intents by
//! case-insensitive substring containment. Accents are significant:
//! "quién" only matches "quién".

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why the visitor is writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// List the owner's repositories.
    Projects,
    /// Short biography.
    About,
    /// Contact links.
    Contact,
    /// No keyword matched.
    Unresolved,
}

// Keyword sets, lowercase. Matching is plain substring containment, so
// "eres" also fires inside "quieres".
const PROJECTS_KEYWORDS: &[&str] = &["proyectos", "repos", "trabajos"];
const ABOUT_KEYWORDS: &[&str] = &["quién eres", "eres", "sobre ti"];
const CONTACT_KEYWORDS: &[&str] = &["contacto", "contactarte", "contactarme", "contigo"];

impl Intent {
    /// Resolvable intents in priority order.
    pub const RESOLVABLE: [Intent; 3] = [Intent::Projects, Intent::About, Intent::Contact];

    /// Trigger keywords for this intent. Empty for `Unresolved`.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Intent::Projects => PROJECTS_KEYWORDS,
            Intent::About => ABOUT_KEYWORDS,
            Intent::Contact => CONTACT_KEYWORDS,
            Intent::Unresolved => &[],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Projects => "projects",
            Intent::About => "about",
            Intent::Contact => "contact",
            Intent::Unresolved => "unresolved",
        }
    }

    fn matches(&self, normalized: &str) -> bool {
        self.keywords().iter().any(|kw| normalized.contains(kw))
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the intent of a raw utterance.
///
/// Checks intents in order: Projects, About, Contact. Falls back to
/// `Unresolved` if nothing matches.
pub fn resolve(utterance: &str) -> Intent {
    let normalized = utterance.to_lowercase();

    Intent::RESOLVABLE
        .into_iter()
        .find(|intent| intent.matches(&normalized))
        .unwrap_or(Intent::Unresolved)
}

// =============================================================================
// Tests
// =============================================================================
