//! Core types for search results and queries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of journal content a search hit points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    /// A project (BuJo) itself.
    Project,
    /// A task in a TODO project.
    Task,
    /// A note in a NOTE project.
    Note,
    /// A transaction in a LEDGER project.
    Transaction,
    /// Content attached to a task, note or transaction.
    Content,
}

impl ContentType {
    /// Returns the human-readable name of this content type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Task => "task",
            Self::Note => "note",
            Self::Transaction => "transaction",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single hit returned by the query endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    /// Identifier of the matching item.
    pub id: i64,
    /// What kind of item matched.
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Display name of the matching item.
    pub name: String,
    /// Name fragments with the matched term highlighted.
    #[serde(default)]
    pub name_highlights: Vec<String>,
    /// Content fragments with the matched term highlighted.
    #[serde(default)]
    pub content_highlights: Vec<String>,
    /// Project holding the item, absent for projects themselves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
}

/// One page of search results, or an accumulation of several pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Hits in display order.
    pub search_result_item_list: Vec<SearchResultItem>,
    /// Cursor for the next page; absent when no more pages exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_id: Option<String>,
    /// Total number of hits across all pages, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hits: Option<u64>,
}

impl SearchResult {
    /// Number of hits held by this result.
    pub fn len(&self) -> usize {
        self.search_result_item_list.len()
    }

    /// Returns `true` when this result holds no hits.
    pub fn is_empty(&self) -> bool {
        self.search_result_item_list.is_empty()
    }

    /// Returns `true` when the backend reported more hits than are held here.
    pub fn has_more(&self) -> bool {
        match (self.scroll_id.as_deref(), self.total_hits) {
            (None, _) | (Some(""), _) => false,
            (Some(_), Some(total)) => (self.len() as u64) < total,
            (Some(_), None) => true,
        }
    }
}

/// Parameters of a single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// The search term, sent verbatim.
    pub term: String,
    /// Zero-based page number.
    pub page_no: u32,
    /// Items per page.
    pub page_size: u32,
    /// Cursor returned by the previous page, for continuations.
    pub scroll_id: Option<String>,
}

impl SearchQuery {
    /// Returns `true` when this query continues a previous page.
    pub fn is_continuation(&self) -> bool {
        self.scroll_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64) -> SearchResultItem {
        SearchResultItem {
            id,
            content_type: ContentType::Task,
            name: format!("task {id}"),
            name_highlights: vec![],
            content_highlights: vec![],
            project_id: Some(7),
        }
    }

    #[test]
    fn decodes_backend_payload() {
        let json = r#"{
            "searchResultItemList": [
                {"id": 11, "type": "TASK", "name": "buy milk",
                 "nameHighlights": ["buy <em>milk</em>"], "projectId": 3},
                {"id": 3, "type": "PROJECT", "name": "groceries"}
            ],
            "scrollId": "c2Nyb2xs",
            "totalHits": 42
        }"#;
        let result: SearchResult = serde_json::from_str(json).expect("deserialize");
        assert_eq!(result.len(), 2);
        assert_eq!(result.search_result_item_list[0].content_type, ContentType::Task);
        assert_eq!(result.search_result_item_list[0].project_id, Some(3));
        assert!(result.search_result_item_list[1].content_highlights.is_empty());
        assert_eq!(result.scroll_id.as_deref(), Some("c2Nyb2xs"));
        assert_eq!(result.total_hits, Some(42));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let result = SearchResult {
            search_result_item_list: vec![item(1)],
            scroll_id: Some("abc".into()),
            total_hits: None,
        };
        let value = serde_json::to_value(&result).expect("serialize");
        assert!(value.get("searchResultItemList").is_some());
        assert_eq!(value["searchResultItemList"][0]["type"], "TASK");
        assert_eq!(value["scrollId"], "abc");
        assert!(value.get("totalHits").is_none());
    }

    #[test]
    fn has_more_follows_cursor_and_total() {
        let mut result = SearchResult {
            search_result_item_list: vec![item(1), item(2)],
            scroll_id: None,
            total_hits: Some(5),
        };
        assert!(!result.has_more());

        result.scroll_id = Some("next".into());
        assert!(result.has_more());

        result.total_hits = Some(2);
        assert!(!result.has_more());

        result.total_hits = None;
        assert!(result.has_more());

        result.scroll_id = Some(String::new());
        assert!(!result.has_more());
    }

    #[test]
    fn content_type_display() {
        assert_eq!(ContentType::Task.to_string(), "task");
        assert_eq!(ContentType::Transaction.to_string(), "transaction");
    }

    #[test]
    fn continuation_detected_by_scroll_id() {
        let query = SearchQuery {
            term: "milk".into(),
            page_no: 0,
            page_size: 10,
            scroll_id: None,
        };
        assert!(!query.is_continuation());
        let next = SearchQuery {
            scroll_id: Some("abc".into()),
            ..query
        };
        assert!(next.is_continuation());
    }
}
