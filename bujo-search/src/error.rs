//! Error types for the bujo-search crate.
//!
//! Messages are stable strings suitable for showing to users. Session
//! cookies and tokens never appear in error messages.

/// Errors that can occur while querying the search backend.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The search term is too short to be sent to the backend.
    #[error("search term too short: {0}")]
    TermTooShort(String),

    /// An HTTP request to the query endpoint failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend answered with a non-success status.
    #[error("backend error ({status}): {message}")]
    Backend {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Upstream message, taken from the error body when present.
        message: String,
    },

    /// Failed to decode the backend's response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for bujo-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_term_too_short() {
        let err = SearchError::TermTooShort("\"ab\" has 2 characters".into());
        assert_eq!(
            err.to_string(),
            "search term too short: \"ab\" has 2 characters"
        );
    }

    #[test]
    fn display_http() {
        let err = SearchError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_backend() {
        let err = SearchError::Backend {
            status: 503,
            message: "index unavailable".into(),
        };
        assert_eq!(err.to_string(), "backend error (503): index unavailable");
    }

    #[test]
    fn display_parse() {
        let err = SearchError::Parse("missing field `searchResultItemList`".into());
        assert_eq!(
            err.to_string(),
            "parse error: missing field `searchResultItemList`"
        );
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("page_size must be > 0".into());
        assert_eq!(err.to_string(), "config error: page_size must be > 0");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
