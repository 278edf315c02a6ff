use movie_discovery::catalog::MovieClient;
use movie_discovery::config::AppConfig;
use movie_discovery::search::handlers::router;
use movie_discovery::search::SearchCoordinator;
use movie_discovery::trending::{DocumentTrendStore, MemoryTrendStore, TrendRecorder, TrendStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        // .with_max_level(tracing::Level::DEBUG)
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!("Movie API at {}", config.api.base_url);

    // 1. Metadata fetcher:
    let movies = Arc::new(MovieClient::new(Arc::new(config.api.clone())));

    // 2. Trend store:
    let store: Arc<dyn TrendStore> = match &config.trend_store {
        Some(store_config) => {
            tracing::info!(
                "Recording trending searches in {} (collection {})",
                store_config.endpoint,
                store_config.collection_id
            );
            Arc::new(DocumentTrendStore::new(store_config.clone()))
        }
        None => {
            tracing::info!("APPWRITE_ENDPOINT not set, keeping trending searches in memory");
            Arc::new(MemoryTrendStore::new())
        }
    };
    let recorder = TrendRecorder::new(store, config.trending_limit);

    // 3. Coordinator:
    let coordinator = SearchCoordinator::new(movies, recorder, config.debounce);

    // 4. Initial load (popular movies + trending board):
    let mounting = coordinator.clone();
    tokio::spawn(async move {
        mounting.mount().await;
    });

    // 5. Start HTTP server:
    let app = router(coordinator);

    tracing::info!("UI listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
