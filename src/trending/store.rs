//! Trend Record Storage
//!
//! The `TrendStore` trait is the datastore contract used by the recorder. It mirrors
//! the four document operations the feature needs: top-N by counter, exact lookup by
//! text, create, and counter update, plus `record_hit` which combines the last three.

use super::types::{NewTrend, TrendRecord};

use anyhow::Result;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

#[async_trait]
pub trait TrendStore: Send + Sync {
    /// Up to `limit` records, highest counter first. Equal counters are ordered
    /// most-recently-updated first.
    async fn top_by_count(&self, limit: usize) -> Result<Vec<TrendRecord>>;

    /// The record whose `search_term` equals `term` exactly.
    async fn find_by_term(&self, term: &str) -> Result<Option<TrendRecord>>;

    /// Inserts a record with `count = 1`.
    async fn create(&self, new: NewTrend) -> Result<TrendRecord>;

    /// Overwrites the counter of an existing record. Other fields are untouched.
    async fn set_count(&self, id: &str, count: u64) -> Result<TrendRecord>;

    /// Counts one more search for `new.search_term`, creating the record on first use.
    ///
    /// The default is a lookup followed by a create or a counter update, so two
    /// concurrent hits for a new term can race. Stores that can do better override it.
    async fn record_hit(&self, new: NewTrend) -> Result<TrendRecord> {
        match self.find_by_term(&new.search_term).await? {
            Some(existing) => self.set_count(&existing.id, existing.count + 1).await,
            None => self.create(new).await,
        }
    }
}

struct StoredTrend {
    record: TrendRecord,
    /// Position in the global write order, used for tie-breaking.
    touched: u64,
}

/// Process-local trend store, keyed by search term. Contents are lost on restart.
pub struct MemoryTrendStore {
    records: DashMap<String, StoredTrend>,
    clock: AtomicU64,
}

impl MemoryTrendStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            clock: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn new_stored(&self, new: NewTrend) -> StoredTrend {
        StoredTrend {
            record: TrendRecord {
                id: uuid::Uuid::new_v4().to_string(),
                search_term: new.search_term,
                count: 1,
                movie_id: new.movie_id,
                title: new.title,
                poster_url: new.poster_url,
            },
            touched: self.tick(),
        }
    }
}

impl Default for MemoryTrendStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrendStore for MemoryTrendStore {
    async fn top_by_count(&self, limit: usize) -> Result<Vec<TrendRecord>> {
        let mut entries: Vec<(u64, TrendRecord)> = self
            .records
            .iter()
            .map(|entry| (entry.touched, entry.record.clone()))
            .collect();

        entries.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(b.0.cmp(&a.0)));

        Ok(entries
            .into_iter()
            .take(limit)
            .map(|(_, record)| record)
            .collect())
    }

    async fn find_by_term(&self, term: &str) -> Result<Option<TrendRecord>> {
        Ok(self.records.get(term).map(|entry| entry.record.clone()))
    }

    async fn create(&self, new: NewTrend) -> Result<TrendRecord> {
        match self.records.entry(new.search_term.clone()) {
            Entry::Occupied(_) => Err(anyhow::anyhow!(
                "Trend record for {:?} already exists",
                new.search_term
            )),
            Entry::Vacant(slot) => {
                let stored = slot.insert(self.new_stored(new));
                tracing::debug!(
                    "Created trend record {} for {:?}",
                    stored.record.id,
                    stored.record.search_term
                );
                Ok(stored.record.clone())
            }
        }
    }

    async fn set_count(&self, id: &str, count: u64) -> Result<TrendRecord> {
        let touched = self.tick();
        let mut entry = self
            .records
            .iter_mut()
            .find(|entry| entry.record.id == id)
            .ok_or_else(|| anyhow::anyhow!("Trend record {} not found", id))?;
        entry.record.count = count;
        entry.touched = touched;
        Ok(entry.record.clone())
    }

    async fn record_hit(&self, new: NewTrend) -> Result<TrendRecord> {
        let stored = self
            .records
            .entry(new.search_term.clone())
            .and_modify(|stored| {
                stored.record.count += 1;
                stored.touched = self.tick();
            })
            .or_insert_with(|| self.new_stored(new));
        Ok(stored.record.clone())
    }
}
