//! Movie Discovery Library
//!
//! This library crate defines the modules that make up the movie discovery app.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The application is composed of four loosely coupled subsystems plus configuration:
//!
//! - **`catalog`**: The metadata fetcher. Builds discovery/search requests against the
//!   TMDB REST API and normalizes payload-level and transport-level failures.
//! - **`trending`**: The trend recorder. Counts successful searches per query text in a
//!   document store and reads back the most searched terms.
//! - **`search`**: The search coordinator. Owns the page state, debounces user input,
//!   drives fetches and exposes the state over HTTP.
//! - **`view`**: Pure HTML rendering of the page state (search box, spinner, cards,
//!   trending board).
//! - **`config`**: Immutable application configuration read once from the environment.

pub mod catalog;
pub mod config;
pub mod search;
pub mod trending;
pub mod view;
