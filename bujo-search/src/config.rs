//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls where queries are sent, how many items a page
//! holds, and the shortest term worth sending.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Number of items requested per search page.
pub const SEARCH_RESULT_PAGE_SIZE: u32 = 10;

/// Shortest search term, in characters, that is sent to the backend.
pub const MIN_TERM_CHARS: usize = 3;

/// Configuration for the search backend.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the BuJo server, e.g. `https://bulletjournal.us`.
    pub base_url: String,
    /// Items requested per page.
    pub page_size: u32,
    /// Shortest accepted search term, counted in UTF-16 code units.
    pub min_term_chars: usize,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, `bujo-search/<version>` is used.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            page_size: SEARCH_RESULT_PAGE_SIZE,
            min_term_chars: MIN_TERM_CHARS,
            timeout_seconds: 10,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` must parse as an absolute URL
    /// - `page_size` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        url::Url::parse(&self.base_url)
            .map_err(|e| SearchError::Config(format!("invalid base_url {:?}: {e}", self.base_url)))?;
        if self.page_size == 0 {
            return Err(SearchError::Config(
                "page_size must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Returns `true` when `term` is long enough to be sent to the backend.
    ///
    /// Length is counted in UTF-16 code units, the unit browser inputs use,
    /// so a character outside the Basic Multilingual Plane counts as two.
    pub fn accepts_term(&self, term: &str) -> bool {
        term_len(term) >= self.min_term_chars
    }
}

/// Length of `term` in UTF-16 code units.
pub fn term_len(term: &str) -> usize {
    term.encode_utf16().count()
}
