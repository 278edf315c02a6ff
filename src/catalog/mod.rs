//! Movie Catalog Module
//!
//! The client side of the movie metadata API (TMDB).
//!
//! ## Overview
//! Every fetch goes to one of two read-only JSON endpoints:
//! - **Discovery** (`/discover/movie?sort_by=popularity.desc`) when the query is empty,
//!   which acts as the default "All Movies" listing.
//! - **Search** (`/search/movie?query=...`) when the query is non-empty.
//!
//! ## Failure Shapes
//! The API can fail in two distinct ways and both are preserved in [`FetchError`]:
//! - a payload that parses but carries `Response: "False"` (logical failure, with its own text),
//! - anything else: transport failure, non-2xx status, undecodable body.
//!
//! ## Submodules
//! - **`client`**: The HTTP client and the [`MovieSource`] seam used by the coordinator.
//! - **`types`**: Movie record, response envelope and error taxonomy.

pub mod client;
pub mod types;

pub use client::{MovieClient, MovieSource};
pub use types::{FetchError, Movie, MoviesPage, GENERIC_FETCH_ERROR, PAYLOAD_FALLBACK_ERROR};
