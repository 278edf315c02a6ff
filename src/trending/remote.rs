//! Document Database Trend Store
//!
//! `TrendStore` backed by a hosted document database speaking the Appwrite
//! databases REST API. Each trend record is one document in a single collection:
//!
//! ```text
//! { "$id": "...", "searchTerm": "alien", "count": 3,
//!   "movie_id": 348, "title": "Alien", "poster_url": "https://..." }
//! ```
//!
//! Queries are sent as JSON-encoded `queries[]` parameters.

use super::store::TrendStore;
use super::types::{NewTrend, TrendRecord};
use crate::config::TrendStoreConfig;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

const HEADER_PROJECT: &str = "X-Appwrite-Project";
const HEADER_KEY: &str = "X-Appwrite-Key";

/// Document shape as stored in the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendDocument {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub count: u64,
    pub movie_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_url: Option<String>,
}

impl From<TrendDocument> for TrendRecord {
    fn from(doc: TrendDocument) -> Self {
        TrendRecord {
            id: doc.id,
            search_term: doc.search_term,
            count: doc.count,
            movie_id: doc.movie_id,
            title: doc.title,
            poster_url: doc.poster_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub documents: Vec<TrendDocument>,
}

pub struct DocumentTrendStore {
    http_client: reqwest::Client,
    config: TrendStoreConfig,
}

impl DocumentTrendStore {
    pub fn new(config: TrendStoreConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config,
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.config.endpoint, self.config.database_id, self.config.collection_id
        )
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        let mut request = self
            .http_client
            .request(method, url)
            .header(HEADER_PROJECT, &self.config.project_id);
        if let Some(key) = &self.config.api_key {
            request = request.header(HEADER_KEY, key);
        }
        request
    }

    async fn list(&self, queries: Vec<serde_json::Value>) -> Result<DocumentList> {
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|query| ("queries[]", query.to_string()))
            .collect();

        let response = self
            .request(reqwest::Method::GET, self.documents_url())
            .query(&params)
            .send()
            .await?;

        let response = check_status(response, "list documents").await?;
        Ok(response.json::<DocumentList>().await?)
    }
}

async fn check_status(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(anyhow::anyhow!("{} failed {}: {}", action, status, body))
}

#[async_trait]
impl TrendStore for DocumentTrendStore {
    async fn top_by_count(&self, limit: usize) -> Result<Vec<TrendRecord>> {
        let list = self
            .list(vec![
                json!({ "method": "limit", "values": [limit] }),
                json!({ "method": "orderDesc", "attribute": "count" }),
                json!({ "method": "orderDesc", "attribute": "$updatedAt" }),
            ])
            .await?;

        Ok(list
            .documents
            .into_iter()
            .take(limit)
            .map(TrendRecord::from)
            .collect())
    }

    async fn find_by_term(&self, term: &str) -> Result<Option<TrendRecord>> {
        let list = self
            .list(vec![
                json!({ "method": "equal", "attribute": "searchTerm", "values": [term] }),
                json!({ "method": "limit", "values": [1] }),
            ])
            .await?;

        Ok(list.documents.into_iter().next().map(TrendRecord::from))
    }

    async fn create(&self, new: NewTrend) -> Result<TrendRecord> {
        let payload = json!({
            "documentId": uuid::Uuid::new_v4().to_string(),
            "data": {
                "searchTerm": new.search_term,
                "count": 1,
                "movie_id": new.movie_id,
                "title": new.title,
                "poster_url": new.poster_url,
            }
        });

        let response = self
            .request(reqwest::Method::POST, self.documents_url())
            .json(&payload)
            .send()
            .await?;

        let response = check_status(response, "create document").await?;
        let doc = response.json::<TrendDocument>().await?;
        tracing::debug!("Created trend document {} for {:?}", doc.id, doc.search_term);
        Ok(doc.into())
    }

    async fn set_count(&self, id: &str, count: u64) -> Result<TrendRecord> {
        let url = format!("{}/{}", self.documents_url(), id);
        let response = self
            .request(reqwest::Method::PATCH, url)
            .json(&json!({ "data": { "count": count } }))
            .send()
            .await?;

        let response = check_status(response, "update document").await?;
        Ok(response.json::<TrendDocument>().await?.into())
    }
}
