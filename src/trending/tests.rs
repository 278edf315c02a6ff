//! Trending Module Tests
//!
//! Validates the counting rules and the fail-soft boundary of the trend recorder.
//!
//! ## Test Scopes
//! - **MemoryTrendStore**: Create, lookup, counter updates, ordering and tie-breaks.
//! - **TrendRecorder**: Create-then-increment semantics, snapshot retention, top-N limit,
//!   error suppression.
//! - **DocumentTrendStore**: Wire format against an in-process fake of the document API.

#[cfg(test)]
mod tests {
    use crate::catalog::Movie;
    use crate::config::TrendStoreConfig;
    use crate::trending::recorder::TrendRecorder;
    use crate::trending::remote::DocumentTrendStore;
    use crate::trending::store::{MemoryTrendStore, TrendStore};
    use crate::trending::types::{NewTrend, TrendRecord};
    use anyhow::Result;
    use async_trait::async_trait;
    use axum::extract::{Path, RawQuery, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, patch};
    use axum::{Json, Router};
    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn movie(id: u64, title: &str, poster: Option<&str>) -> Movie {
        serde_json::from_value(json!({
            "id": id,
            "title": title,
            "poster_path": poster,
        }))
        .unwrap()
    }

    fn new_trend(term: &str) -> NewTrend {
        NewTrend::from_search(term, &movie(1, "Some Movie", Some("/p.jpg")))
    }

    /// A store whose every operation fails, simulating a datastore outage.
    struct FailingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TrendStore for FailingStore {
        async fn top_by_count(&self, _limit: usize) -> Result<Vec<TrendRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow::anyhow!("datastore unavailable"))
        }

        async fn find_by_term(&self, _term: &str) -> Result<Option<TrendRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow::anyhow!("datastore unavailable"))
        }

        async fn create(&self, _new: NewTrend) -> Result<TrendRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow::anyhow!("datastore unavailable"))
        }

        async fn set_count(&self, _id: &str, _count: u64) -> Result<TrendRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(anyhow::anyhow!("datastore unavailable"))
        }
    }

    // ============================================================
    // MEMORY STORE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_memory_store_create_and_find() {
        let store = MemoryTrendStore::new();

        let created = store.create(new_trend("alien")).await.unwrap();
        assert_eq!(created.count, 1);
        assert_eq!(created.search_term, "alien");
        assert_eq!(
            created.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/p.jpg")
        );

        let found = store.find_by_term("alien").await.unwrap();
        assert_eq!(found, Some(created));

        // Lookup is exact, not case-insensitive.
        assert!(store.find_by_term("Alien").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_set_count_unknown_id_fails() {
        let store = MemoryTrendStore::new();
        assert!(store.set_count("missing", 2).await.is_err());
    }

    #[tokio::test]
    async fn test_memory_store_orders_by_count_desc() {
        let store = MemoryTrendStore::new();
        let a = store.create(new_trend("a")).await.unwrap();
        let b = store.create(new_trend("b")).await.unwrap();
        store.create(new_trend("c")).await.unwrap();

        store.set_count(&a.id, 3).await.unwrap();
        store.set_count(&b.id, 7).await.unwrap();

        let top = store.top_by_count(10).await.unwrap();
        let terms: Vec<&str> = top.iter().map(|r| r.search_term.as_str()).collect();
        assert_eq!(terms, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_memory_store_tie_break_most_recently_updated_first() {
        let store = MemoryTrendStore::new();
        let first = store.create(new_trend("first")).await.unwrap();
        let second = store.create(new_trend("second")).await.unwrap();

        store.set_count(&second.id, 2).await.unwrap();
        store.set_count(&first.id, 2).await.unwrap();

        let top = store.top_by_count(2).await.unwrap();
        assert_eq!(top[0].search_term, "first");
        assert_eq!(top[1].search_term, "second");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_memory_store_concurrent_hits_are_all_counted() {
        let store = Arc::new(MemoryTrendStore::new());

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.record_hit(new_trend("dune")).await.unwrap() })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len(), 1);
        let record = store.find_by_term("dune").await.unwrap().unwrap();
        assert_eq!(record.count, 64);
    }

    #[tokio::test]
    async fn test_memory_store_rejects_duplicate_create() {
        let store = MemoryTrendStore::new();
        store.create(new_trend("heat")).await.unwrap();

        assert!(store.create(new_trend("heat")).await.is_err());
        assert_eq!(store.len(), 1);
    }

    // ============================================================
    // RECORDER TESTS
    // ============================================================

    #[tokio::test]
    async fn test_recording_twice_increments_and_keeps_snapshot() {
        let store = Arc::new(MemoryTrendStore::new());
        let recorder = TrendRecorder::new(store.clone(), 5);

        recorder
            .record_search("batman", &movie(268, "Batman", Some("/old.jpg")))
            .await;
        recorder
            .record_search("batman", &movie(414906, "The Batman", Some("/new.jpg")))
            .await;

        assert_eq!(store.len(), 1);
        let record = store.find_by_term("batman").await.unwrap().unwrap();
        assert_eq!(record.count, 2);
        assert_eq!(record.movie_id, 268);
        assert_eq!(record.title, "Batman");
        assert_eq!(
            record.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/old.jpg")
        );
    }

    #[tokio::test]
    async fn test_empty_query_is_not_recorded() {
        let store = Arc::new(MemoryTrendStore::new());
        let recorder = TrendRecorder::new(store.clone(), 5);

        recorder.record_search("", &movie(1, "Anything", None)).await;

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_trending_returns_at_most_limit_in_count_order() {
        let store = Arc::new(MemoryTrendStore::new());
        let recorder = TrendRecorder::new(store.clone(), 5);

        for (i, term) in ["a", "b", "c", "d", "e", "f", "g"].iter().enumerate() {
            for _ in 0..=i {
                recorder.record_search(term, &movie(i as u64, term, None)).await;
            }
        }

        let trending = recorder.get_trending().await;
        assert_eq!(trending.len(), 5);
        let counts: Vec<u64> = trending.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![7, 6, 5, 4, 3]);
        assert_eq!(trending[0].search_term, "g");
    }

    #[tokio::test]
    async fn test_store_failures_are_swallowed() {
        let store = Arc::new(FailingStore {
            calls: AtomicUsize::new(0),
        });
        let recorder = TrendRecorder::new(store.clone(), 5);

        recorder.record_search("alien", &movie(348, "Alien", None)).await;
        let trending = recorder.get_trending().await;

        assert!(trending.is_empty());
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }

    // ============================================================
    // DOCUMENT STORE TESTS (fake document API)
    // ============================================================

    #[derive(Clone, Default)]
    struct FakeDocumentApi {
        documents: Arc<Mutex<Vec<Value>>>,
        projects_seen: Arc<Mutex<Vec<String>>>,
        queries_seen: Arc<Mutex<Vec<Vec<Value>>>>,
        clock: Arc<AtomicUsize>,
        fail: bool,
    }

    impl FakeDocumentApi {
        /// Stand-in for the `$updatedAt` timestamp: zero-padded so it sorts as text.
        fn stamp(&self) -> String {
            format!("{:010}", self.clock.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    fn compare_attribute(a: &Value, b: &Value, attribute: &str) -> std::cmp::Ordering {
        match (a[attribute].as_u64(), b[attribute].as_u64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => a[attribute].as_str().cmp(&b[attribute].as_str()),
        }
    }

    fn parse_queries(raw: Option<String>) -> Vec<Value> {
        raw.unwrap_or_default()
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .filter_map(|(_, value)| {
                let value = value.replace('+', " ");
                let decoded = urlencoding::decode(&value).ok()?;
                serde_json::from_str(&decoded).ok()
            })
            .collect()
    }

    async fn fake_list(
        State(api): State<FakeDocumentApi>,
        headers: HeaderMap,
        RawQuery(raw): RawQuery,
    ) -> (StatusCode, Json<Value>) {
        if api.fail {
            return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "message": "down" })));
        }
        if let Some(project) = headers.get("x-appwrite-project").and_then(|v| v.to_str().ok()) {
            api.projects_seen.lock().push(project.to_string());
        }

        let queries = parse_queries(raw);
        api.queries_seen.lock().push(queries.clone());

        let mut docs = api.documents.lock().clone();
        let mut limit = usize::MAX;
        let mut order: Vec<String> = Vec::new();
        for query in &queries {
            match query["method"].as_str() {
                Some("equal") => {
                    let attribute = query["attribute"].as_str().unwrap();
                    let wanted = query["values"][0].clone();
                    docs.retain(|doc| doc[attribute] == wanted);
                }
                Some("orderDesc") => {
                    order.push(query["attribute"].as_str().unwrap().to_string());
                }
                Some("limit") => {
                    limit = query["values"][0].as_u64().unwrap() as usize;
                }
                _ => {}
            }
        }
        docs.sort_by(|a, b| {
            order
                .iter()
                .map(|attribute| compare_attribute(b, a, attribute))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        docs.truncate(limit);

        (
            StatusCode::OK,
            Json(json!({ "total": docs.len(), "documents": docs })),
        )
    }

    async fn fake_create(
        State(api): State<FakeDocumentApi>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let mut doc = body["data"].clone();
        doc["$id"] = body["documentId"].clone();
        doc["$updatedAt"] = json!(api.stamp());
        api.documents.lock().push(doc.clone());
        (StatusCode::CREATED, Json(doc))
    }

    async fn fake_update(
        State(api): State<FakeDocumentApi>,
        Path((_db, _col, id)): Path<(String, String, String)>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let mut documents = api.documents.lock();
        match documents.iter_mut().find(|doc| doc["$id"] == id.as_str()) {
            Some(doc) => {
                if let Some(fields) = body["data"].as_object() {
                    for (key, value) in fields {
                        doc[key] = value.clone();
                    }
                }
                doc["$updatedAt"] = json!(api.stamp());
                (StatusCode::OK, Json(doc.clone()))
            }
            None => (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))),
        }
    }

    async fn start_fake_document_api(api: FakeDocumentApi) -> TrendStoreConfig {
        let app = Router::new()
            .route(
                "/v1/databases/:db/collections/:col/documents",
                get(fake_list).post(fake_create),
            )
            .route(
                "/v1/databases/:db/collections/:col/documents/:id",
                patch(fake_update),
            )
            .with_state(api);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TrendStoreConfig {
            endpoint: format!("http://{}/v1", addr),
            project_id: "movies-project".to_string(),
            database_id: "db".to_string(),
            collection_id: "metrics".to_string(),
            api_key: None,
        }
    }

    #[tokio::test]
    async fn test_document_store_records_and_ranks_searches() {
        let api = FakeDocumentApi::default();
        let config = start_fake_document_api(api.clone()).await;
        let store = Arc::new(DocumentTrendStore::new(config));
        let recorder = TrendRecorder::new(store.clone(), 5);

        recorder
            .record_search("dune", &movie(438631, "Dune", Some("/dune.jpg")))
            .await;
        recorder
            .record_search("dune", &movie(693134, "Dune: Part Two", Some("/dune2.jpg")))
            .await;
        recorder
            .record_search("heat", &movie(949, "Heat", None))
            .await;

        let stored = api.documents.lock().clone();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0]["searchTerm"], "dune");
        assert_eq!(stored[0]["count"], 2);
        assert_eq!(stored[0]["movie_id"], 438631);

        let trending = recorder.get_trending().await;
        assert_eq!(trending.len(), 2);
        assert_eq!(trending[0].search_term, "dune");
        assert_eq!(trending[0].count, 2);
        assert_eq!(trending[0].title, "Dune");
        assert_eq!(trending[1].search_term, "heat");
        assert!(trending[1].poster_url.is_none());

        assert!(api
            .projects_seen
            .lock()
            .iter()
            .all(|project| project == "movies-project"));
    }

    #[tokio::test]
    async fn test_document_store_ties_rank_most_recently_updated_first() {
        let api = FakeDocumentApi::default();
        let config = start_fake_document_api(api.clone()).await;
        let store = Arc::new(DocumentTrendStore::new(config));
        let recorder = TrendRecorder::new(store.clone(), 5);

        for term in ["first", "second", "second", "first"] {
            recorder.record_search(term, &movie(1, term, None)).await;
        }

        let trending = recorder.get_trending().await;
        let terms: Vec<&str> = trending.iter().map(|r| r.search_term.as_str()).collect();
        assert_eq!(terms, vec!["first", "second"]);
        assert!(trending.iter().all(|r| r.count == 2));

        let last_list = api.queries_seen.lock().last().cloned().unwrap();
        let orderings: Vec<&str> = last_list
            .iter()
            .filter(|q| q["method"] == "orderDesc")
            .map(|q| q["attribute"].as_str().unwrap())
            .collect();
        assert_eq!(orderings, vec!["count", "$updatedAt"]);
    }

    #[tokio::test]
    async fn test_document_store_error_status_is_reported() {
        let api = FakeDocumentApi {
            fail: true,
            ..Default::default()
        };
        let config = start_fake_document_api(api).await;
        let store = DocumentTrendStore::new(config);

        let err = store.top_by_count(5).await.unwrap_err();
        assert!(err.to_string().contains("503"));
        assert!(store.find_by_term("dune").await.is_err());
    }
}
