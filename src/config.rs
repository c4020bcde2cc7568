//! Configuration types for the BuJo client.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{BujoError, Result};

/// Top-level client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BujoConfig {
    /// Server connection settings.
    pub api: ApiConfig,
    /// Search paging settings.
    pub search: SearchSettings,
}

/// Server connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the BuJo server.
    pub base_url: String,
    /// Per-request timeout in seconds. Requests are never retried.
    pub timeout_seconds: u64,
    /// User-Agent override.
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            timeout_seconds: 30,
            user_agent: None,
        }
    }
}

/// Search paging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Items requested per page.
    pub page_size: u32,
    /// Shortest accepted term, in characters.
    pub min_term_chars: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: bujo_search::SEARCH_RESULT_PAGE_SIZE,
            min_term_chars: bujo_search::MIN_TERM_CHARS,
        }
    }
}

impl BujoConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| BujoError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| BujoError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/bujo/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("bujo").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("bujo")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/bujo-config/config.toml")
        }
    }

    /// Search backend configuration derived from both sections.
    pub fn search_config(&self) -> bujo_search::SearchConfig {
        bujo_search::SearchConfig {
            base_url: self.api.base_url.clone(),
            page_size: self.search.page_size,
            min_term_chars: self.search.min_term_chars,
            timeout_seconds: self.api.timeout_seconds,
            user_agent: self.api.user_agent.clone(),
        }
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns [`BujoError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.search_config()
            .validate()
            .map_err(|e| BujoError::Config(e.to_string()))
    }
}
