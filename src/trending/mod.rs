//! Trending Searches Module
//!
//! Counts how often each query text is searched and exposes the most popular ones.
//!
//! ## Lifecycle of a Record
//! 1. **Create**: The first successful search for a text creates a record with `count = 1`
//!    and a snapshot of the top result (id, title, poster).
//! 2. **Increment**: Every later identical search bumps the counter. The snapshot is kept
//!    as first seen.
//! 3. **Read**: The top records by counter are read once per page mount.
//!
//! Records are never deleted here.
//!
//! ## Failure Isolation
//! The recorder is a fail-soft boundary: store errors are logged and dropped so a
//! datastore outage only degrades the trending board, never search.
//!
//! ## Submodules
//! - **`types`**: `TrendRecord` and the creation payload.
//! - **`store`**: The `TrendStore` trait and the in-memory implementation.
//! - **`remote`**: Document-database (Appwrite REST) implementation of `TrendStore`.
//! - **`recorder`**: `TrendRecorder`, the only entry point used by the search flow.

pub mod recorder;
pub mod remote;
pub mod store;
pub mod types;

pub use recorder::TrendRecorder;
pub use remote::DocumentTrendStore;
pub use store::{MemoryTrendStore, TrendStore};
pub use types::{NewTrend, TrendRecord};

#[cfg(test)]
mod tests;
