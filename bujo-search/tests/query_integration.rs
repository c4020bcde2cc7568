//! Integration tests for the HTTP query backend.
//!
//! These tests run the backend against a local `wiremock` server and
//! exercise the continuation flow end to end: first page, then a "load
//! more" page accumulated after it.

use bujo_search::{
    accumulate, search_page, HttpSearchBackend, SearchBackend, SearchConfig, SearchError,
    SearchQuery,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> SearchConfig {
    SearchConfig {
        base_url: server.uri(),
        timeout_seconds: 5,
        ..Default::default()
    }
}

fn page_body(ids: &[i64], scroll_id: Option<&str>, total: u64) -> serde_json::Value {
    let items: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| json!({"id": id, "type": "TASK", "name": format!("task {id}"), "projectId": 1}))
        .collect();
    json!({
        "searchResultItemList": items,
        "scrollId": scroll_id,
        "totalHits": total,
    })
}

#[tokio::test]
async fn first_page_sends_term_page_and_size() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .and(query_param("term", "milk"))
        .and(query_param("pageNo", "0"))
        .and(query_param("pageSize", "10"))
        .and(query_param_is_missing("scrollId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], Some("s1"), 4)))
        .expect(1)
        .mount(&server)
        .await;

    let page = search_page("milk", 0, None, &config_for(&server))
        .await
        .expect("first page");
    assert_eq!(page.len(), 2);
    assert_eq!(page.scroll_id.as_deref(), Some("s1"));
    assert!(page.has_more());
}

#[tokio::test]
async fn load_more_appends_after_previous_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .and(query_param_is_missing("scrollId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], Some("s1"), 4)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/query"))
        .and(query_param("scrollId", "s1"))
        .and(query_param("pageNo", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[3, 4], None, 4)))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpSearchBackend::new(&config_for(&server)).expect("backend");
    let first = backend
        .fetch_page(&SearchQuery {
            term: "milk".into(),
            page_no: 0,
            page_size: 10,
            scroll_id: None,
        })
        .await
        .expect("first page");
    let second = backend
        .fetch_page(&SearchQuery {
            term: "milk".into(),
            page_no: 1,
            page_size: 10,
            scroll_id: first.scroll_id.clone(),
        })
        .await
        .expect("second page");

    let all = accumulate(Some(first), second);
    let ids: Vec<i64> = all.search_result_item_list.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert!(!all.has_more());
}

#[tokio::test]
async fn error_status_carries_upstream_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"message": "search index offline"})),
        )
        .mount(&server)
        .await;

    let err = search_page("milk", 0, None, &config_for(&server))
        .await
        .unwrap_err();
    match err {
        SearchError::Backend { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "search index offline");
        }
        other => panic!("expected backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = search_page("milk", 0, None, &config_for(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Parse(_)));
}

#[tokio::test]
async fn short_term_never_reaches_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[], None, 0)))
        .expect(0)
        .mount(&server)
        .await;

    let err = search_page("mi", 0, None, &config_for(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::TermTooShort(_)));
}
