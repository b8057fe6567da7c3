use log::debug;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::models::{PairToken, SearchFilters};
use crate::pagination::Paginator;

/// Snapshot of everything the search page renders from
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub search_query: String,
    pub filters: SearchFilters,
    /// Owns the pair list; `pairs()` reads through it so both always agree
    pub paginator: Paginator<PairToken>,
    /// Bumped after every mutation
    pub revision: u64,
}

impl SearchState {
    fn new(page_size: usize) -> Self {
        Self {
            search_query: String::new(),
            filters: SearchFilters::default(),
            paginator: Paginator::new(Vec::new(), page_size),
            revision: 0,
        }
    }

    /// All mapped pairs from the last completed search
    pub fn pairs(&self) -> &[PairToken] {
        self.paginator.items()
    }
}

/// Single source of truth for the search page
///
/// Share it behind an `Arc`. Every action takes the state lock once, so a
/// reader never sees a pair list and a paginator from different searches.
/// Subscribers receive the new revision after each action.
pub struct SearchStore {
    state: Mutex<SearchState>,
    page_size: usize,
    revision_tx: watch::Sender<u64>,
}

impl SearchStore {
    /// Create an empty store paging results by `page_size`
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let (revision_tx, _) = watch::channel(0);
        Self {
            state: Mutex::new(SearchState::new(page_size)),
            page_size,
            revision_tx,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Receive the revision number after every mutation
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision_tx.subscribe()
    }

    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    /// Consistent copy of the whole state
    pub fn snapshot(&self) -> SearchState {
        self.lock().clone()
    }

    /// Read the state without copying it
    pub fn read<R>(&self, f: impl FnOnce(&SearchState) -> R) -> R {
        f(&self.lock())
    }

    pub fn search_query(&self) -> String {
        self.lock().search_query.clone()
    }

    pub fn filters(&self) -> SearchFilters {
        self.lock().filters.clone()
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.update(|state| state.search_query = query);
    }

    /// Replace the filters wholesale
    pub fn set_filters(&self, filters: SearchFilters) {
        self.update(|state| state.filters = filters);
    }

    pub fn reset_filters(&self) {
        self.update(|state| state.filters = SearchFilters::default());
    }

    /// Replace the results with a fresh paginator positioned on page 1
    pub fn set_pairs(&self, pairs: Vec<PairToken>) {
        let page_size = self.page_size;
        debug!("Storing {} pairs", pairs.len());
        self.update(|state| state.paginator = Paginator::new(pairs, page_size));
    }

    pub fn next_page(&self) {
        self.update(|state| state.paginator.next_page());
    }

    pub fn previous_page(&self) {
        self.update(|state| state.paginator.previous_page());
    }

    pub fn go_to_page(&self, page: usize) {
        self.update(|state| state.paginator.go_to_page(page));
    }

    pub fn go_to_first_page(&self) {
        self.update(|state| state.paginator.go_to_first_page());
    }

    pub fn go_to_last_page(&self) {
        self.update(|state| state.paginator.go_to_last_page());
    }

    fn lock(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn update(&self, f: impl FnOnce(&mut SearchState)) {
        let mut state = self.lock();
        f(&mut state);
        state.revision += 1;
        // Published under the lock so subscribers see revisions in order
        self.revision_tx.send_replace(state.revision);
    }
}

impl Default for SearchStore {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
