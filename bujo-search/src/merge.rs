//! Page accumulation for "load more" continuations.
//!
//! A fresh search replaces whatever was shown. A continuation keeps the
//! hits already shown and appends the new page after them, taking the new
//! page's cursor and total.

use crate::types::SearchResult;

/// Combine the previously accumulated result with a freshly fetched page.
///
/// With `previous == None` (fresh search, or nothing shown yet) the page is
/// returned unchanged. Otherwise the item list is `previous ++ page`, and
/// the cursor and total come from `page`.
pub fn accumulate(previous: Option<SearchResult>, page: SearchResult) -> SearchResult {
    let Some(mut accumulated) = previous else {
        return page;
    };

    accumulated
        .search_result_item_list
        .extend(page.search_result_item_list);
    accumulated.scroll_id = page.scroll_id;
    accumulated.total_hits = page.total_hits.or(accumulated.total_hits);
    accumulated
}
