//! Metadata API Client
//!
//! Issues the discovery/search requests and folds every outcome into
//! `Result<Vec<Movie>, FetchError>`. The client holds no mutable state; the API
//! base URL and credential come from the immutable [`ApiConfig`].

use super::types::{FetchError, Movie, MoviesPage};
use crate::config::ApiConfig;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use std::sync::Arc;

/// Anything that can produce a result list for a query.
///
/// The coordinator depends on this seam rather than on [`MovieClient`] directly.
#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, FetchError>;
}

pub struct MovieClient {
    http_client: reqwest::Client,
    config: Arc<ApiConfig>,
}

impl MovieClient {
    pub fn new(config: Arc<ApiConfig>) -> Self {
        if config.api_key.is_none() {
            tracing::warn!("No TMDB API key configured, requests will be sent unauthenticated");
        }
        Self {
            http_client: reqwest::Client::new(),
            config,
        }
    }

    /// Endpoint for a query: discovery listing when empty, text search otherwise.
    pub fn endpoint_for(&self, query: &str) -> String {
        if query.is_empty() {
            format!("{}/discover/movie?sort_by=popularity.desc", self.config.base_url)
        } else {
            format!(
                "{}/search/movie?query={}",
                self.config.base_url,
                urlencoding::encode(query)
            )
        }
    }
}

#[async_trait]
impl MovieSource for MovieClient {
    async fn fetch_movies(&self, query: &str) -> Result<Vec<Movie>, FetchError> {
        let url = self.endpoint_for(query);
        tracing::debug!("Fetching movies from {}", url);

        let mut request = self
            .http_client
            .get(url)
            .header(ACCEPT, "application/json");
        if let Some(key) = &self.config.api_key {
            request = request.header(AUTHORIZATION, format!("Bearer {}", key));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        // A failure flag in the body wins over the HTTP status.
        let page = serde_json::from_slice::<MoviesPage>(&body);
        if let Ok(page) = &page {
            if page.is_failure() {
                return Err(FetchError::Payload {
                    message: page.error.clone(),
                });
            }
        }

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let page = page?;
        let movies = page.results.unwrap_or_default();
        tracing::debug!("Fetched {} movies for query {:?}", movies.len(), query);
        Ok(movies)
    }
}
