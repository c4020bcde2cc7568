//! HTTP backend for the BuJo query endpoint.
//!
//! Issues `GET /api/query?term=..&pageNo=..&pageSize=..[&scrollId=..]`
//! and decodes the JSON [`SearchResult`] body.

use crate::backend::SearchBackend;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::types::{SearchQuery, SearchResult};
use url::Url;

/// Path of the query endpoint relative to the server base URL.
pub const QUERY_PATH: &str = "/api/query";

/// Search backend talking to a BuJo server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSearchBackend {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSearchBackend {
    /// Create a backend from `config`, building its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid and
    /// [`SearchError::Http`] if the client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let client = http::build_client(config)?;
        Self::with_client(client, &config.base_url)
    }

    /// Create a backend sharing an existing HTTP client (and its cookie jar).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `base_url` cannot be parsed.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, SearchError> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join(QUERY_PATH))
            .map_err(|e| SearchError::Config(format!("invalid base_url {base_url:?}: {e}")))?;
        Ok(Self { client, endpoint })
    }

    /// The fully qualified query endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the request URL for `query`.
    pub(crate) fn request_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("term", &query.term)
                .append_pair("pageNo", &query.page_no.to_string())
                .append_pair("pageSize", &query.page_size.to_string());
            if let Some(ref scroll_id) = query.scroll_id {
                pairs.append_pair("scrollId", scroll_id);
            }
        }
        url
    }
}

impl SearchBackend for HttpSearchBackend {
    async fn fetch_page(&self, query: &SearchQuery) -> Result<SearchResult, SearchError> {
        tracing::trace!(term = %query.term, page_no = query.page_no, "query request");

        let response = self
            .client
            .get(self.request_url(query))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("query request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("query response read failed: {e}")))?;

        if !status.is_success() {
            return Err(SearchError::Backend {
                status: status.as_u16(),
                message: upstream_message(&body, status),
            });
        }

        tracing::debug!(bytes = body.len(), %status, "query response received");

        parse_search_result(&body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Decode a query response body.
///
/// Extracted as a separate function for testability with canned bodies.
pub(crate) fn parse_search_result(body: &str) -> Result<SearchResult, SearchError> {
    serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))
}

/// Pull the human-readable message out of an error body.
///
/// Prefers a JSON `message` field, then the raw body, then the status reason.
pub fn upstream_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            if !message.is_empty() {
                return message.to_owned();
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_owned();
    }
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_owned(), str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> HttpSearchBackend {
        HttpSearchBackend::with_client(reqwest::Client::new(), "https://bujo.example")
            .expect("valid base url")
    }

    #[test]
    fn endpoint_joins_query_path() {
        assert_eq!(backend().endpoint().as_str(), "https://bujo.example/api/query");
    }

    #[test]
    fn request_url_without_cursor() {
        let url = backend().request_url(&SearchQuery {
            term: "buy milk".into(),
            page_no: 2,
            page_size: 10,
            scroll_id: None,
        });
        assert_eq!(
            url.as_str(),
            "https://bujo.example/api/query?term=buy+milk&pageNo=2&pageSize=10"
        );
    }

    #[test]
    fn request_url_with_cursor() {
        let url = backend().request_url(&SearchQuery {
            term: "milk".into(),
            page_no: 0,
            page_size: 5,
            scroll_id: Some("a=b".into()),
        });
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[3], ("scrollId".to_string(), "a=b".to_string()));
    }

    #[test]
    fn invalid_base_url_rejected() {
        let err = HttpSearchBackend::with_client(reqwest::Client::new(), "not a url").unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn parse_rejects_malformed_body() {
        let err = parse_search_result("{\"scrollId\": 1}").unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn upstream_message_prefers_json_message() {
        let status = reqwest::StatusCode::BAD_REQUEST;
        assert_eq!(
            upstream_message(r#"{"message":"term is required"}"#, status),
            "term is required"
        );
        assert_eq!(upstream_message("plain failure\n", status), "plain failure");
        assert_eq!(upstream_message("", status), "Bad Request");
        assert_eq!(upstream_message(r#"{"error":"x"}"#, status), r#"{"error":"x"}"#);
    }
}
