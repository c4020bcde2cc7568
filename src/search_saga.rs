//! Search coordinator: validates a search trigger, fetches one page and
//! writes results and progress flags into the store.
//!
//! Only the latest trigger is honored. Dispatching a new search cancels the
//! one in flight; a cancelled search never writes to the store again.
//! Cancellation and store writes share one lock, so every message from a
//! superseded search is queued before any message from its successor.
//!
//! # Flags
//!
//! | Trigger | Raised while fetching | After completion |
//! |---------|-----------------------|------------------|
//! | fresh search | `searching` | both `false` |
//! | load more (`scroll_id`) | `loading_more` | both `false` |

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bujo_search::{SearchBackend, SearchConfig, SearchQuery, accumulate};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::notify::Notifier;
use crate::store::{StoreHandle, StoreMessage};

/// Payload of a search trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchAction {
    pub term: String,
    /// Cursor of the last shown page; present for "load more".
    pub scroll_id: Option<String>,
}

impl SearchAction {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            scroll_id: None,
        }
    }

    pub fn load_more(term: impl Into<String>, scroll_id: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            scroll_id: Some(scroll_id.into()),
        }
    }
}

/// How a dispatched search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The term was too short; nothing was fetched.
    Rejected,
    /// Results were written; `items` is the accumulated list length.
    Completed { items: usize },
    /// The fetch failed; the error was shown to the user.
    Failed,
    /// A newer search took over before this one finished.
    Superseded,
}

#[derive(Default)]
struct Inflight {
    next_generation: u64,
    current: Option<(u64, CancellationToken)>,
}

impl Inflight {
    fn is_current(&self, generation: u64) -> bool {
        matches!(self.current, Some((g, _)) if g == generation)
    }
}

struct Inner<B> {
    backend: B,
    store: StoreHandle,
    notifier: Arc<dyn Notifier>,
    config: SearchConfig,
    inflight: Mutex<Inflight>,
}

/// Cancellable single-flight search coordinator.
pub struct SearchSaga<B> {
    inner: Arc<Inner<B>>,
}

impl<B> Clone for SearchSaga<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: SearchBackend + 'static> SearchSaga<B> {
    pub fn new(
        backend: B,
        store: StoreHandle,
        notifier: Arc<dyn Notifier>,
        config: SearchConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                store,
                notifier,
                config,
                inflight: Mutex::new(Inflight::default()),
            }),
        }
    }

    /// Start a search, cancelling any search still in flight.
    ///
    /// The returned handle resolves once this search has finished writing
    /// to the store, or has been superseded.
    pub fn dispatch(&self, action: SearchAction) -> JoinHandle<SearchOutcome> {
        let token = CancellationToken::new();
        let generation = {
            let mut inflight = self.inner.lock_inflight();
            inflight.next_generation += 1;
            let generation = inflight.next_generation;
            if let Some((previous, previous_token)) =
                inflight.current.replace((generation, token.clone()))
            {
                previous_token.cancel();
                debug!(previous, generation, "search superseded");
                self.inner.reset_flags();
            }
            generation
        };

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { inner.run(action, generation, token).await })
    }

    /// Abandon the search in flight, if any.
    pub fn cancel(&self) {
        let mut inflight = self.inner.lock_inflight();
        if let Some((generation, token)) = inflight.current.take() {
            token.cancel();
            debug!(generation, "search cancelled");
            self.inner.reset_flags();
        }
    }

    /// Returns `true` while a dispatched search has not finished.
    pub fn is_in_flight(&self) -> bool {
        self.inner.lock_inflight().current.is_some()
    }
}

impl<B: SearchBackend> Inner<B> {
    fn lock_inflight(&self) -> MutexGuard<'_, Inflight> {
        self.inflight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue both flags down. Callers hold the in-flight lock.
    fn reset_flags(&self) {
        for message in [
            StoreMessage::UpdateSearching { searching: false },
            StoreMessage::UpdateLoadingMore {
                loading_more: false,
            },
        ] {
            if let Err(e) = self.store.dispatch(message) {
                warn!(error = %e, "failed to reset search flags");
            }
        }
    }

    /// Write `messages` if `generation` is still the current search.
    fn commit(&self, generation: u64, messages: Vec<StoreMessage>) -> bool {
        let inflight = self.lock_inflight();
        self.commit_locked(&inflight, generation, messages)
    }

    /// Write `messages` and release the in-flight slot, if `generation` is
    /// still the current search.
    fn finish(&self, generation: u64, messages: Vec<StoreMessage>) -> bool {
        let mut inflight = self.lock_inflight();
        if !self.commit_locked(&inflight, generation, messages) {
            return false;
        }
        inflight.current = None;
        true
    }

    fn commit_locked(
        &self,
        inflight: &Inflight,
        generation: u64,
        messages: Vec<StoreMessage>,
    ) -> bool {
        if !inflight.is_current(generation) {
            return false;
        }
        for message in messages {
            if let Err(e) = self.store.dispatch(message) {
                warn!(error = %e, "search result dropped");
                return false;
            }
        }
        true
    }

    async fn run(
        &self,
        action: SearchAction,
        generation: u64,
        token: CancellationToken,
    ) -> SearchOutcome {
        let SearchAction { term, scroll_id } = action;

        if !self.config.accepts_term(&term) {
            self.notifier.error(&format!(
                "Please enter at least {} characters to search",
                self.config.min_term_chars
            ));
            self.finish(generation, Vec::new());
            return SearchOutcome::Rejected;
        }

        let state = tokio::select! {
            biased;
            () = token.cancelled() => return SearchOutcome::Superseded,
            state = self.store.get_state() => state,
        };
        let state = match state {
            Ok(state) => state,
            Err(e) => return self.fail(generation, &e.to_string()),
        };

        let loading_more = scroll_id.is_some();
        let raise = if loading_more {
            StoreMessage::UpdateLoadingMore { loading_more: true }
        } else {
            StoreMessage::UpdateSearching { searching: true }
        };
        if !self.commit(generation, vec![raise]) {
            return SearchOutcome::Superseded;
        }

        let query = SearchQuery {
            term,
            page_no: state.search_page_no,
            page_size: self.config.page_size,
            scroll_id,
        };
        debug!(
            backend = self.backend.name(),
            page_no = query.page_no,
            loading_more,
            "search started"
        );

        let fetched = tokio::select! {
            biased;
            () = token.cancelled() => return SearchOutcome::Superseded,
            fetched = self.backend.fetch_page(&query) => fetched,
        };

        match fetched {
            Ok(page) => {
                // Load more with nothing shown yet starts a new list.
                let previous = if loading_more {
                    state.search_result
                } else {
                    None
                };
                let search_result = accumulate(previous, page);
                let items = search_result.len();
                let written = self.finish(
                    generation,
                    vec![
                        StoreMessage::SearchResultReceived { search_result },
                        StoreMessage::UpdateSearching { searching: false },
                        StoreMessage::UpdateLoadingMore {
                            loading_more: false,
                        },
                        StoreMessage::UpdateSearchPageNo {
                            search_page_no: state.search_page_no + 1,
                        },
                    ],
                );
                if !written {
                    return SearchOutcome::Superseded;
                }
                info!(items, page_no = query.page_no, "search completed");
                SearchOutcome::Completed { items }
            }
            Err(e) => self.fail(generation, &e.to_string()),
        }
    }

    fn fail(&self, generation: u64, error: &str) -> SearchOutcome {
        let written = self.finish(
            generation,
            vec![
                StoreMessage::UpdateSearching { searching: false },
                StoreMessage::UpdateLoadingMore {
                    loading_more: false,
                },
            ],
        );
        if !written {
            return SearchOutcome::Superseded;
        }
        warn!(error, "search failed");
        self.notifier
            .error(&format!("search Error Received: {error}"));
        SearchOutcome::Failed
    }
}
