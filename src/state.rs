use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::types::{ResultSet, SearchPhase};

/// The only mutable state of a search bar.
///
/// Results are replaced wholesale, never merged. Concurrent searches race
/// and whichever finishes last wins; nothing here orders them by start time.
pub struct ResultState {
    results: RwLock<Arc<ResultSet>>,
    phase: RwLock<SearchPhase>,
    next_search_id: AtomicU64,
}

impl Default for ResultState {
    fn default() -> Self {
        Self {
            results: RwLock::new(Arc::new(ResultSet::new())),
            phase: RwLock::new(SearchPhase::Idle),
            next_search_id: AtomicU64::new(0),
        }
    }
}

impl ResultState {
    pub fn snapshot(&self) -> Arc<ResultSet> {
        self.results.read().clone()
    }

    pub fn replace(&self, results: ResultSet) {
        *self.results.write() = Arc::new(results);
    }

    pub fn reset(&self) {
        self.replace(ResultSet::new());
    }

    pub fn phase(&self) -> SearchPhase {
        *self.phase.read()
    }

    pub fn set_phase(&self, phase: SearchPhase) {
        *self.phase.write() = phase;
    }

    // Only used to correlate log lines of one invocation.
    pub fn begin_search(&self) -> u64 {
        self.next_search_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}
