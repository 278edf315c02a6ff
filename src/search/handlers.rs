use super::coordinator::SearchCoordinator;
use super::types::{QueryRequest, QueryResponse, UiState};
use crate::view;

use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;

pub const ENDPOINT_PAGE: &str = "/";
pub const ENDPOINT_MOVIES_PARTIAL: &str = "/partials/movies";
pub const ENDPOINT_STATE: &str = "/api/state";
pub const ENDPOINT_QUERY: &str = "/api/query";

/// All routes of the app, bound to one coordinator.
pub fn router(coordinator: Arc<SearchCoordinator>) -> Router {
    Router::new()
        .route(ENDPOINT_PAGE, get(handle_page))
        .route(ENDPOINT_MOVIES_PARTIAL, get(handle_movies_partial))
        .route(ENDPOINT_STATE, get(handle_state))
        .route(ENDPOINT_QUERY, post(handle_set_query))
        .layer(Extension(coordinator))
}

/// A page load is a mount: the trending board is re-read before rendering.
pub async fn handle_page(
    Extension(coordinator): Extension<Arc<SearchCoordinator>>,
) -> Html<String> {
    coordinator.load_trending().await;
    Html(view::render_page(&coordinator.snapshot()))
}

pub async fn handle_movies_partial(
    Extension(coordinator): Extension<Arc<SearchCoordinator>>,
) -> Html<String> {
    Html(view::movies_section(&coordinator.snapshot()))
}

pub async fn handle_state(
    Extension(coordinator): Extension<Arc<SearchCoordinator>>,
) -> Json<UiState> {
    Json(coordinator.snapshot())
}

pub async fn handle_set_query(
    Extension(coordinator): Extension<Arc<SearchCoordinator>>,
    Json(req): Json<QueryRequest>,
) -> (StatusCode, Json<QueryResponse>) {
    tracing::trace!("Query edited: {:?}", req.query);
    coordinator.set_query(req.query.clone());
    (StatusCode::ACCEPTED, Json(QueryResponse { query: req.query }))
}
