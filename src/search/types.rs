use crate::catalog::Movie;
use crate::trending::TrendRecord;
use serde::{Deserialize, Serialize};

/// Everything the page renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UiState {
    /// Live text of the search box.
    pub query: String,
    /// The query the current results belong to.
    pub debounced_query: String,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub movie_list: Vec<Movie>,
    pub trending_movies: Vec<TrendRecord>,
}

/// What the results section shows. Loading wins over error, error wins over the list.
#[derive(Debug, PartialEq)]
pub enum MoviesView<'a> {
    Loading,
    Error(&'a str),
    Movies(&'a [Movie]),
}

impl UiState {
    pub fn movies_view(&self) -> MoviesView<'_> {
        if self.is_loading {
            MoviesView::Loading
        } else if let Some(message) = self.error_message.as_deref().filter(|m| !m.is_empty()) {
            MoviesView::Error(message)
        } else {
            MoviesView::Movies(&self.movie_list)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query: String,
}
