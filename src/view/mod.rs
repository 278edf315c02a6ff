//! Presentation Module
//!
//! Pure functions from `UiState` to HTML. Nothing here holds state or performs I/O;
//! the search box only echoes the live query back.
//!
//! ## Submodules
//! - **`components`**: Search input, spinner, movie card, trending board, results section.
//! - **`page`**: The full document, including the inline script that forwards keystrokes
//!   and refreshes the results section.

pub mod components;
pub mod page;

pub use components::{escape_html, movie_card, movies_section, search_input, spinner, trending_list};
pub use page::render_page;
