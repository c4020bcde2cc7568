//! Trait definition for pluggable search backends.
//!
//! The HTTP query endpoint implements [`SearchBackend`]; tests and offline
//! callers can supply their own implementation.

use crate::error::SearchError;
use crate::types::{SearchQuery, SearchResult};

/// A source of paginated search results.
///
/// Each call fetches exactly one page. Implementations make a single
/// attempt: no retries and no backoff.
///
/// All implementations must be `Send + Sync` so a backend can be shared
/// between search tasks.
pub trait SearchBackend: Send + Sync {
    /// Fetch one page of results for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails, the backend answers
    /// with an error status, or the body cannot be decoded.
    fn fetch_page(
        &self,
        query: &SearchQuery,
    ) -> impl std::future::Future<Output = Result<SearchResult, SearchError>> + Send;

    /// Short name used in log fields.
    fn name(&self) -> &'static str;
}

impl<B: SearchBackend> SearchBackend for std::sync::Arc<B> {
    fn fetch_page(
        &self,
        query: &SearchQuery,
    ) -> impl std::future::Future<Output = Result<SearchResult, SearchError>> + Send {
        (**self).fetch_page(query)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentType, SearchResultItem};

    /// A mock backend for testing trait bounds and async execution.
    struct MockBackend {
        pages: Vec<SearchResult>,
    }

    impl SearchBackend for MockBackend {
        async fn fetch_page(&self, query: &SearchQuery) -> Result<SearchResult, SearchError> {
            self.pages
                .get(query.page_no as usize)
                .cloned()
                .ok_or_else(|| SearchError::Backend {
                    status: 404,
                    message: format!("no page {}", query.page_no),
                })
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    fn page(ids: &[i64]) -> SearchResult {
        SearchResult {
            search_result_item_list: ids
                .iter()
                .map(|&id| SearchResultItem {
                    id,
                    content_type: ContentType::Note,
                    name: format!("note {id}"),
                    name_highlights: vec![],
                    content_highlights: vec![],
                    project_id: None,
                })
                .collect(),
            scroll_id: None,
            total_hits: None,
        }
    }

    fn query(page_no: u32) -> SearchQuery {
        SearchQuery {
            term: "note".into(),
            page_no,
            page_size: 10,
            scroll_id: None,
        }
    }

    #[test]
    fn mock_backend_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockBackend>();
    }

    #[tokio::test]
    async fn mock_backend_returns_requested_page() {
        let backend = MockBackend {
            pages: vec![page(&[1, 2]), page(&[3])],
        };
        let result = backend.fetch_page(&query(1)).await.expect("page 1");
        assert_eq!(result.len(), 1);
        assert_eq!(result.search_result_item_list[0].id, 3);
    }

    #[tokio::test]
    async fn mock_backend_propagates_errors() {
        let backend = MockBackend { pages: vec![] };
        let err = backend.fetch_page(&query(0)).await.unwrap_err();
        assert!(err.to_string().contains("no page 0"));
    }

    #[tokio::test]
    async fn arc_backend_delegates() {
        let backend = std::sync::Arc::new(MockBackend {
            pages: vec![page(&[9])],
        });
        assert_eq!(SearchBackend::name(&backend), "mock");
        let result = backend.fetch_page(&query(0)).await.expect("page 0");
        assert_eq!(result.search_result_item_list[0].id, 9);
    }
}
