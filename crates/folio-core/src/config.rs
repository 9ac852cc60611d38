use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{FolioError, Result};
use crate::types::{default_contacts, ContactEntry};

/// Top-level configuration for the portfolio chat.
///
/// Loaded from `~/.folio/config.toml` by default. Every section falls back
/// to the values the published site uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default = "default_contacts")]
    pub contacts: Vec<ContactEntry>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            github: GithubConfig::default(),
            chat: ChatConfig::default(),
            contacts: default_contacts(),
        }
    }
}

impl FolioConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FolioConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| FolioError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Repository host settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// Account whose public repositories are listed.
    pub account: String,
    /// REST API base URL, without trailing slash.
    pub api_base_url: String,
    /// Sent as `User-Agent`; GitHub rejects requests without one.
    pub user_agent: String,
    /// Optional request timeout. Unset means wait indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            account: "tore234".to_string(),
            api_base_url: "https://api.github.com".to_string(),
            user_agent: concat!("folio-portfolio/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Chat widget settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Number of repositories listed by the projects reply.
    pub max_projects: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { max_projects: 5 }
    }
}
