//! Query state container
//!
//! Single owner of the search UI state. The input side calls [`SearchStore::set_query`]
//! on every keystroke; the view side watches snapshots through
//! [`SearchStore::subscribe`]. Both hold clones of the same store.
//!
//! Two kinds of background work hang off the store:
//!
//! * a debounce timer, restarted by every `set_query`, that promotes the raw
//!   query to the debounced search key once input goes quiet;
//! * at most one live fetch, tagged with a generation number and the key it
//!   was issued for. Responses whose tag no longer matches are dropped, so a
//!   slow reply for an older key can never overwrite a newer one.
//!
//! Lock order is always `tasks` then the watch channel's value lock.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::backend::SearchBackend;
use super::error::SearchError;
use super::result::SearchResult;
use super::share::QuerySink;

/// Quiet period before typed input becomes the search key
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// Snapshot of the search UI state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Raw input, updated on every keystroke
    pub query: String,
    /// Search key; trails `query` by the debounce delay
    pub debounced_query: String,
    /// `None` until a fetch for the current key completes
    pub results: Option<Vec<SearchResult>>,
    pub is_loading: bool,
    pub error: bool,
}

impl SearchState {
    /// A fetch completed with zero matches
    pub fn is_empty(&self) -> bool {
        matches!(&self.results, Some(results) if results.is_empty())
    }
}

/// Shared handle to the search state
pub struct SearchStore<B: SearchBackend> {
    shared: Arc<Shared<B>>,
}

impl<B: SearchBackend> Clone for SearchStore<B> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

struct Shared<B> {
    backend: Arc<B>,
    delay: Duration,
    state: watch::Sender<SearchState>,
    tasks: Mutex<Tasks>,
    generation: AtomicU64,
    closed: AtomicBool,
    sink: Option<Arc<dyn QuerySink>>,
}

#[derive(Default)]
struct Tasks {
    debounce: Option<JoinHandle<()>>,
    /// Bumped whenever the pending timer is superseded
    debounce_seq: u64,
    fetch: Option<JoinHandle<()>>,
}

impl Tasks {
    fn abort_all(&mut self) {
        if let Some(timer) = self.debounce.take() {
            timer.abort();
        }
        if let Some(fetch) = self.fetch.take() {
            fetch.abort();
        }
    }
}

#[derive(Clone, Copy)]
enum Trigger {
    Timer(u64),
    Direct,
}

impl<B: SearchBackend> SearchStore<B> {
    #[cfg(test)]
    pub fn new(backend: B, delay: Duration) -> Self {
        Self::with_sink(backend, delay, None)
    }

    /// Create a store that reports every new search key to `sink`
    pub fn with_sink(backend: B, delay: Duration, sink: Option<Arc<dyn QuerySink>>) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            shared: Arc::new(Shared {
                backend: Arc::new(backend),
                delay,
                state,
                tasks: Mutex::new(Tasks::default()),
                generation: AtomicU64::new(0),
                closed: AtomicBool::new(false),
                sink,
            }),
        }
    }

    /// Update the raw query and restart the debounce timer
    ///
    /// Must be called from within a Tokio runtime.
    pub fn set_query(&self, query: impl Into<String>) {
        let shared = &self.shared;
        if shared.is_closed() {
            return;
        }

        let query = query.into();
        let mut tasks = shared.tasks();

        shared.state.send_if_modified(|s| {
            if s.query == query {
                return false;
            }
            s.query = query.clone();
            true
        });

        if let Some(pending) = tasks.debounce.take() {
            pending.abort();
        }
        tasks.debounce_seq += 1;

        let seq = tasks.debounce_seq;
        let delay = shared.delay;
        let weak = Arc::downgrade(shared);
        tasks.debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(shared) = weak.upgrade() {
                shared.apply_debounced(query, Trigger::Timer(seq));
            }
        }));
    }

    /// Set the search key immediately, skipping the debounce timer
    ///
    /// Also mirrors the value into `query` so the input box agrees.
    pub fn set_debounced_query(&self, query: impl Into<String>) {
        self.shared.apply_debounced(query.into(), Trigger::Direct);
    }

    /// Current state
    pub fn snapshot(&self) -> SearchState {
        self.shared.state.borrow().clone()
    }

    /// Observe state changes
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.state.subscribe()
    }

    /// Cancel pending work; later calls and late responses are ignored
    pub fn close(&self) {
        self.shared.closed.store(true, Ordering::SeqCst);
        self.shared.tasks().abort_all();
        debug!("search store closed");
    }
}

impl<B: SearchBackend> Shared<B> {
    fn tasks(&self) -> MutexGuard<'_, Tasks> {
        self.tasks.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn apply_debounced(self: &Arc<Self>, query: String, trigger: Trigger) {
        if self.is_closed() {
            return;
        }

        let mut tasks = self.tasks();
        match trigger {
            Trigger::Timer(seq) => {
                if tasks.debounce_seq != seq {
                    return;
                }
                tasks.debounce = None;
            }
            Trigger::Direct => {
                tasks.debounce_seq += 1;
                if let Some(pending) = tasks.debounce.take() {
                    pending.abort();
                }
            }
        }

        let mut rekeyed = false;
        let mut key_changed = false;
        let mut issued = None;

        self.state.send_if_modified(|s| {
            let mut modified = false;
            if matches!(trigger, Trigger::Direct) && s.query != query {
                s.query = query.clone();
                modified = true;
            }

            // Same key only refetches after a failure
            let retry = s.error && !query.is_empty();
            if s.debounced_query == query && !retry {
                return modified;
            }

            rekeyed = true;
            key_changed = s.debounced_query != query;
            s.debounced_query = query.clone();

            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            s.results = None;
            s.error = false;
            s.is_loading = !query.is_empty();
            if s.is_loading {
                issued = Some(generation);
            }
            true
        });

        if !rekeyed {
            return;
        }

        if let Some(fetch) = tasks.fetch.take() {
            fetch.abort();
        }
        if let Some(generation) = issued {
            tasks.fetch = Some(self.spawn_fetch(query.clone(), generation));
        }
        drop(tasks);

        if key_changed {
            if let Some(sink) = &self.sink {
                sink.query_changed(&query);
            }
        }
    }

    fn spawn_fetch(self: &Arc<Self>, query: String, generation: u64) -> JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let weak = Arc::downgrade(self);

        debug!("fetch #{} for {:?}", generation, query);
        tokio::spawn(async move {
            let outcome = backend.search(&query).await;
            if let Some(shared) = weak.upgrade() {
                shared.resolve(&query, generation, outcome);
            }
        })
    }

    fn resolve(&self, query: &str, generation: u64, outcome: Result<Vec<SearchResult>, SearchError>) {
        if self.is_closed() {
            return;
        }

        self.state.send_if_modified(|s| {
            if self.generation.load(Ordering::SeqCst) != generation || s.debounced_query != query {
                debug!("dropping stale response #{} for {:?}", generation, query);
                return false;
            }

            match outcome {
                Ok(results) => {
                    info!("{} results for {:?}", results.len(), query);
                    s.results = Some(results);
                }
                Err(err) => {
                    warn!("search for {:?} failed: {}", query, err);
                    s.error = true;
                }
            }
            s.is_loading = false;
            true
        });
    }
}

impl<B> Drop for Shared<B> {
    fn drop(&mut self) {
        match self.tasks.get_mut() {
            Ok(tasks) => tasks.abort_all(),
            Err(poisoned) => poisoned.into_inner().abort_all(),
        }
    }
}
