//! Error types for the BuJo client.

/// Top-level error type for the BuJo client.
#[derive(Debug, thiserror::Error)]
pub enum BujoError {
    /// The server rejected a request, or the request never got an answer.
    ///
    /// Displays as the upstream message alone so it can be shown to users
    /// unchanged.
    #[error("{message}")]
    Api {
        /// HTTP status, when the server answered.
        status: Option<u16>,
        /// Upstream message.
        message: String,
    },

    /// Local input validation failed before anything was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// Search pipeline error.
    #[error("search error: {0}")]
    Search(#[from] bujo_search::SearchError),

    /// Project relation tree error.
    #[error("hierarchy error: {0}")]
    Hierarchy(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel send/receive error.
    #[error("channel error: {0}")]
    Channel(String),
}

impl BujoError {
    /// Build an [`BujoError::Api`] for a failure that never reached the server.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Api {
            status: None,
            message: message.into(),
        }
    }

    /// The HTTP status attached to an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            Self::Search(bujo_search::SearchError::Backend { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, BujoError>;
