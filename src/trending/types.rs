use crate::catalog::Movie;
use serde::{Deserialize, Serialize};

/// A persisted search counter, keyed by the exact query text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    /// Store-assigned document identifier.
    pub id: String,
    pub search_term: String,
    pub count: u64,
    /// Snapshot of the top result at creation time.
    pub movie_id: u64,
    pub title: String,
    pub poster_url: Option<String>,
}

/// Data needed to create a record on the first search for a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrend {
    pub search_term: String,
    pub movie_id: u64,
    pub title: String,
    pub poster_url: Option<String>,
}

impl NewTrend {
    pub fn from_search(query: &str, top: &Movie) -> Self {
        Self {
            search_term: query.to_string(),
            movie_id: top.id,
            title: top.title.clone(),
            poster_url: top.poster_url(),
        }
    }
}
