//! # bujo-search
//!
//! Paginated full-text search over a BuJo server's projects, tasks, notes
//! and transactions.
//!
//! ## Design
//!
//! - One request per page, addressed by page number and an opaque scroll
//!   cursor returned by the previous page
//! - Pluggable [`SearchBackend`] so callers can drive searches from memory
//! - "Load more" accumulation keeps already shown hits first
//! - Single attempt per page: no retries, no backoff
//!
//! ## Privacy
//!
//! - Search terms are logged only at trace level
//! - Error messages never include cookies or tokens

pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod merge;
pub mod query;
pub mod types;

pub use backend::SearchBackend;
pub use config::{term_len, SearchConfig, MIN_TERM_CHARS, SEARCH_RESULT_PAGE_SIZE};
pub use error::{Result, SearchError};
pub use merge::accumulate;
pub use query::HttpSearchBackend;
pub use types::{ContentType, SearchQuery, SearchResult, SearchResultItem};

/// Fetch one page of results from a BuJo server.
///
/// Validates `config` and the term length, then queries
/// `config.base_url` for page `page_no`, continuing from `scroll_id`
/// when given.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid configuration,
/// [`SearchError::TermTooShort`] for a term below `config.min_term_chars`,
/// and the backend's error otherwise.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> bujo_search::Result<()> {
/// let config = bujo_search::SearchConfig::default();
/// let page = bujo_search::search_page("groceries", 0, None, &config).await?;
/// for item in &page.search_result_item_list {
///     println!("{} {}", item.content_type, item.name);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_page(
    term: &str,
    page_no: u32,
    scroll_id: Option<&str>,
    config: &SearchConfig,
) -> Result<SearchResult> {
    config.validate()?;
    check_term(term, config)?;
    let backend = HttpSearchBackend::new(config)?;
    let query = SearchQuery {
        term: term.to_owned(),
        page_no,
        page_size: config.page_size,
        scroll_id: scroll_id.map(str::to_owned),
    };
    backend.fetch_page(&query).await
}

/// Reject terms shorter than `config.min_term_chars` characters.
///
/// # Errors
///
/// Returns [`SearchError::TermTooShort`] when the term is too short.
pub fn check_term(term: &str, config: &SearchConfig) -> Result<()> {
    if config.accepts_term(term) {
        Ok(())
    } else {
        Err(SearchError::TermTooShort(format!(
            "{:?} has {} characters, at least {} required",
            term,
            config::term_len(term),
            config.min_term_chars
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_page_validates_config_zero_page_size() {
        let config = SearchConfig {
            page_size: 0,
            ..Default::default()
        };
        let err = search_page("milk", 0, None, &config).await.unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[tokio::test]
    async fn search_page_rejects_short_term_before_network() {
        let config = SearchConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..Default::default()
        };
        let err = search_page("ab", 0, None, &config).await.unwrap_err();
        assert!(matches!(err, SearchError::TermTooShort(_)));
    }

    #[test]
    fn check_term_reports_lengths() {
        let err = check_term("ab", &SearchConfig::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("2 characters"));
        assert!(message.contains("at least 3"));
    }

    #[test]
    fn check_term_accepts_emoji_term_of_three_units() {
        assert!(check_term("😀a", &SearchConfig::default()).is_ok());
        let err = check_term("😀", &SearchConfig::default()).unwrap_err();
        assert!(err.to_string().contains("2 characters"));
    }
}
