//! Search Coordinator
//!
//! Owns `UiState` and drives the fetch lifecycle:
//!
//! ```text
//! set_query ─► Debouncer ─(delay)─► debounced query changed? ─► spawn fetch
//!                                                                   │
//!             UiState ◄── results / error message ◄── MovieSource ◄─┘
//!                                   │
//!                                   └─► TrendRecorder (non-empty query, ≥1 result)
//! ```
//!
//! The state lock is a synchronous `parking_lot::RwLock` and is never held across
//! an `.await`.

use super::debounce::Debouncer;
use super::types::UiState;
use crate::catalog::{MovieSource, GENERIC_FETCH_ERROR};
use crate::trending::TrendRecorder;

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

pub struct SearchCoordinator {
    source: Arc<dyn MovieSource>,
    recorder: Arc<TrendRecorder>,
    state: Arc<RwLock<UiState>>,
    debouncer: Debouncer,
}

/// Keeps `is_loading` raised for its lifetime.
///
/// Dropping the guard lowers the flag, so it is released on every exit path of a
/// fetch, including early returns and unwinding.
struct LoadingGuard {
    state: Arc<RwLock<UiState>>,
}

impl LoadingGuard {
    fn engage(state: &Arc<RwLock<UiState>>) -> Self {
        {
            let mut state = state.write();
            state.is_loading = true;
            state.error_message = None;
        }
        Self {
            state: state.clone(),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.state.write().is_loading = false;
    }
}

impl SearchCoordinator {
    pub fn new(
        source: Arc<dyn MovieSource>,
        recorder: Arc<TrendRecorder>,
        debounce: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            source,
            recorder,
            state: Arc::new(RwLock::new(UiState::default())),
            debouncer: Debouncer::new(debounce),
        })
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> UiState {
        self.state.read().clone()
    }

    /// Records an edit of the search box.
    ///
    /// The fetch happens only after the debounce window passes without further edits.
    pub fn set_query(self: &Arc<Self>, query: impl Into<String>) {
        let query = query.into();
        self.state.write().query = query.clone();

        let coordinator = Arc::clone(self);
        self.debouncer
            .schedule(move || coordinator.apply_debounced(query));
    }

    /// Publishes a settled query; triggers a fetch only when it differs from the last one.
    fn apply_debounced(self: Arc<Self>, query: String) {
        {
            let mut state = self.state.write();
            if state.debounced_query == query {
                tracing::trace!("Debounced query unchanged: {:?}", query);
                return;
            }
            state.debounced_query = query.clone();
        }

        tracing::debug!("Debounced query settled: {:?}", query);
        tokio::spawn(async move {
            self.fetch_movies(&query).await;
        });
    }

    /// Initial load: results for the current debounced query and the trending board.
    pub async fn mount(&self) {
        let query = self.state.read().debounced_query.clone();
        tokio::join!(self.fetch_movies(&query), self.load_trending());
    }

    /// Runs one fetch and applies its outcome to the state.
    pub async fn fetch_movies(&self, query: &str) {
        let _loading = LoadingGuard::engage(&self.state);

        match self.source.fetch_movies(query).await {
            Ok(movies) => {
                let top = movies.first().cloned();
                self.state.write().movie_list = movies;

                if let (false, Some(top)) = (query.is_empty(), top) {
                    self.recorder.record_search(query, &top).await;
                }
            }
            Err(err) if err.is_payload() => {
                tracing::warn!("Movie API reported a failure for {:?}: {}", query, err);
                let mut state = self.state.write();
                state.error_message = Some(err.user_message());
                state.movie_list.clear();
            }
            Err(err) => {
                tracing::error!("Error fetching movies for {:?}: {}", query, err);
                self.state.write().error_message = Some(GENERIC_FETCH_ERROR.to_string());
            }
        }
    }

    /// Replaces the trending list with the current top searches.
    pub async fn load_trending(&self) {
        let trending = self.recorder.get_trending().await;
        tracing::debug!("Loaded {} trending searches", trending.len());
        self.state.write().trending_movies = trending;
    }
}
