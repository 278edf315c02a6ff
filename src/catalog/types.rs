use serde::{Deserialize, Serialize};

/// Image CDN prefix for poster paths returned by the API.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Message shown for every failure that is not a payload-level failure.
pub const GENERIC_FETCH_ERROR: &str = "Error fetching movies. Please try again later.";

/// Message shown for a payload-level failure that carries no text of its own.
pub const PAYLOAD_FALLBACK_ERROR: &str = "Failed to fetch movies";

/// A movie as returned by the metadata API.
///
/// Only a handful of fields are read by the application. Everything else is kept
/// in `extra` so the record survives a round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Movie {
    /// Absolute poster URL, if the movie has a poster.
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| {
                if path.starts_with('/') {
                    format!("{}{}", POSTER_BASE_URL, path)
                } else {
                    format!("{}/{}", POSTER_BASE_URL, path)
                }
            })
    }

    /// Rating with one decimal, `None` when absent or zero.
    pub fn rating_label(&self) -> Option<String> {
        self.vote_average
            .filter(|rating| *rating > 0.0)
            .map(|rating| format!("{:.1}", rating))
    }

    /// Year part of `release_date` (`YYYY-MM-DD`).
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
    }
}

/// Response envelope shared by the discovery and search endpoints.
///
/// `results` may be missing entirely; `Response`/`Error` are only present when the
/// API signals a logical failure inside an otherwise well-formed body.
#[derive(Debug, Default, Deserialize)]
pub struct MoviesPage {
    #[serde(default)]
    pub results: Option<Vec<Movie>>,
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

impl MoviesPage {
    pub fn is_failure(&self) -> bool {
        self.response.as_deref() == Some("False")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to fetch movies: HTTP {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API answered with a body flagging a logical failure.
    #[error("API reported failure: {}", .message.as_deref().unwrap_or(PAYLOAD_FALLBACK_ERROR))]
    Payload { message: Option<String> },
}

impl FetchError {
    pub fn is_payload(&self) -> bool {
        matches!(self, FetchError::Payload { .. })
    }

    /// The text the page shows for this failure.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Payload { message } => message
                .as_deref()
                .filter(|text| !text.is_empty())
                .unwrap_or(PAYLOAD_FALLBACK_ERROR)
                .to_string(),
            _ => GENERIC_FETCH_ERROR.to_string(),
        }
    }
}
