use super::store::TrendStore;
use super::types::{NewTrend, TrendRecord};
use crate::catalog::Movie;

use anyhow::Result;
use std::sync::Arc;

/// Fail-soft front of the trend store.
///
/// Neither method returns an error: failures are logged and the caller carries on
/// as if the trending feature did not exist.
pub struct TrendRecorder {
    store: Arc<dyn TrendStore>,
    limit: usize,
}

impl TrendRecorder {
    pub fn new(store: Arc<dyn TrendStore>, limit: usize) -> Arc<Self> {
        Arc::new(Self { store, limit })
    }

    /// Counts one successful search for `query` whose best match was `top`.
    pub async fn record_search(&self, query: &str, top: &Movie) {
        if query.is_empty() {
            return;
        }
        if let Err(e) = self.try_record(query, top).await {
            tracing::warn!("Failed to record search {:?}: {:#}", query, e);
        }
    }

    async fn try_record(&self, query: &str, top: &Movie) -> Result<()> {
        let record = self
            .store
            .record_hit(NewTrend::from_search(query, top))
            .await?;
        tracing::debug!("Search {:?} now counted {} times", query, record.count);
        Ok(())
    }

    /// The most searched terms, at most `limit` of them. Empty on any store failure.
    pub async fn get_trending(&self) -> Vec<TrendRecord> {
        match self.store.top_by_count(self.limit).await {
            Ok(mut records) => {
                records.truncate(self.limit);
                records
            }
            Err(e) => {
                tracing::warn!("Failed to load trending searches: {:#}", e);
                Vec::new()
            }
        }
    }
}
