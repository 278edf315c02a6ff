//! Search Coordination Module
//!
//! The stateful core of the page: it turns keystrokes into fetches and fetch
//! outcomes into renderable state.
//!
//! ## Overview
//! - Every edit updates the live query and reschedules a trailing-edge debounce task.
//! - When the task fires, the debounced query is updated; a change triggers a fetch.
//! - Fetches are spawned and never cancelled. The last response to arrive wins.
//! - Successful non-empty searches are forwarded to the trend recorder.
//!
//! ## Responsibilities
//! - **State**: Query, debounced query, loading flag, error message, results, trending list.
//! - **Debounce**: Collapsing bursts of edits into one fetch for the final text.
//! - **API**: Serving the page, the results fragment and the state over HTTP.
//!
//! ## Submodules
//! - **`coordinator`**: `SearchCoordinator`, the owner of `UiState`.
//! - **`debounce`**: Cancellable deferred task.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: `UiState` and the HTTP DTOs.

pub mod coordinator;
pub mod debounce;
pub mod handlers;
pub mod types;

pub use coordinator::SearchCoordinator;
pub use types::{MoviesView, UiState};
