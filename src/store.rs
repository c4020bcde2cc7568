//! Single-writer UI state store.
//!
//! [`SearchState`] is owned by one actor task. Everything else changes it by
//! sending [`StoreMessage`]s and observes it through a `watch` channel.
//! Messages are applied strictly in the order they were sent.

use bujo_search::SearchResult;
use tokio::sync::{mpsc, oneshot, watch};

use crate::error::{BujoError, Result};

/// Search slice of the UI state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub search_result: Option<SearchResult>,
    pub searching: bool,
    pub loading_more: bool,
    pub search_page_no: u32,
}

/// A state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreMessage {
    SearchResultReceived { search_result: SearchResult },
    UpdateSearching { searching: bool },
    UpdateLoadingMore { loading_more: bool },
    UpdateSearchPageNo { search_page_no: u32 },
    /// Forget results and paging, e.g. when the search box is emptied.
    ResetSearch,
}

impl SearchState {
    /// Apply one transition.
    pub fn reduce(&mut self, message: StoreMessage) {
        match message {
            StoreMessage::SearchResultReceived { search_result } => {
                self.search_result = Some(search_result);
            }
            StoreMessage::UpdateSearching { searching } => self.searching = searching,
            StoreMessage::UpdateLoadingMore { loading_more } => self.loading_more = loading_more,
            StoreMessage::UpdateSearchPageNo { search_page_no } => {
                self.search_page_no = search_page_no;
            }
            StoreMessage::ResetSearch => *self = Self::default(),
        }
    }
}

enum Command {
    Apply(StoreMessage),
    Read(oneshot::Sender<SearchState>),
}

/// Cloneable handle used to dispatch messages and read state.
#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<SearchState>,
}

impl StoreHandle {
    /// Queue a transition.
    ///
    /// # Errors
    ///
    /// Returns [`BujoError::Channel`] if the store task has stopped.
    pub fn dispatch(&self, message: StoreMessage) -> Result<()> {
        self.tx
            .send(Command::Apply(message))
            .map_err(|_| BujoError::Channel("store task stopped".into()))
    }

    /// State after every message dispatched so far has been applied.
    ///
    /// # Errors
    ///
    /// Returns [`BujoError::Channel`] if the store task has stopped.
    pub async fn get_state(&self) -> Result<SearchState> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Command::Read(reply_tx))
            .map_err(|_| BujoError::Channel("store task stopped".into()))?;
        reply_rx
            .await
            .map_err(|e| BujoError::Channel(format!("store reply dropped: {e}")))
    }

    /// Latest published state, without waiting for queued messages.
    pub fn snapshot(&self) -> SearchState {
        self.state_rx.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state_rx.clone()
    }
}

/// The store actor. Create with [`store`], then run on a task.
pub struct Store {
    rx: mpsc::UnboundedReceiver<Command>,
    state_tx: watch::Sender<SearchState>,
}

/// Create a store with default state.
#[must_use]
pub fn store() -> (StoreHandle, Store) {
    store_with(SearchState::default())
}

/// Create a store starting from `initial`.
#[must_use]
pub fn store_with(initial: SearchState) -> (StoreHandle, Store) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(initial);
    (StoreHandle { tx, state_rx }, Store { rx, state_tx })
}

impl Store {
    /// Apply messages until every handle has been dropped.
    pub async fn run(mut self) {
        tracing::debug!("store started");
        while let Some(command) = self.rx.recv().await {
            match command {
                Command::Apply(message) => {
                    tracing::trace!(?message, "store message");
                    self.state_tx.send_modify(|state| state.reduce(message));
                }
                Command::Read(reply) => {
                    // The reader may have given up waiting.
                    let _ = reply.send(self.state_tx.borrow().clone());
                }
            }
        }
        tracing::debug!("store stopped");
    }

    /// Spawn the actor on the current runtime and return its handle.
    #[must_use]
    pub fn spawn() -> StoreHandle {
        let (handle, store) = store();
        tokio::spawn(store.run());
        handle
    }
}
