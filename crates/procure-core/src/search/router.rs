use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::catalog::CatalogSource;
use super::domain::{SearchFilters, SearchResult};
use super::engine::{SearchEngine, SearchOutcome};
use super::export::export_csv;
use super::sort::SearchSort;

/// Router builder exposing search, state inspection, clearing, and CSV export.
///
/// `GET /export` writes the visible page; `POST /export` ranks the posted request on
/// its own and leaves the visible state alone.
pub fn search_router<S>(engine: Arc<SearchEngine<S>>) -> Router
where
    S: CatalogSource + 'static,
{
    Router::new()
        .route(
            "/api/v1/search",
            post(search_handler::<S>).delete(clear_handler::<S>),
        )
        .route("/api/v1/search/state", get(state_handler::<S>))
        .route(
            "/api/v1/search/export",
            get(export_handler::<S>).post(export_query_handler::<S>),
        )
        .with_state(engine)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchRequest {
    #[serde(default)]
    filters: SearchFilters,
    #[serde(default = "first_page")]
    page: usize,
    #[serde(default)]
    page_size: Option<usize>,
    #[serde(default)]
    sort: SearchSort,
}

fn first_page() -> usize {
    1
}

fn unprocessable(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}

pub(crate) async fn search_handler<S>(
    State(engine): State<Arc<SearchEngine<S>>>,
    axum::Json(request): axum::Json<SearchRequest>,
) -> Response
where
    S: CatalogSource + 'static,
{
    if let Err(error) = request.filters.validate() {
        return unprocessable(error.to_string());
    }
    let pagination = match engine.pagination(request.page, request.page_size) {
        Ok(pagination) => pagination,
        Err(error) => return unprocessable(error.to_string()),
    };

    match engine
        .search(&request.filters, pagination, request.sort)
        .await
    {
        SearchOutcome::Ready(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        SearchOutcome::Failed(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        SearchOutcome::Superseded { request } => {
            let payload = json!({
                "error": "superseded by a newer search",
                "request": request,
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn state_handler<S>(State(engine): State<Arc<SearchEngine<S>>>) -> Response
where
    S: CatalogSource + 'static,
{
    (StatusCode::OK, axum::Json(engine.state())).into_response()
}

pub(crate) async fn clear_handler<S>(State(engine): State<Arc<SearchEngine<S>>>) -> Response
where
    S: CatalogSource + 'static,
{
    engine.clear_results();
    StatusCode::NO_CONTENT.into_response()
}

/// Export the currently visible page; an idle or failed engine exports only the header.
pub(crate) async fn export_handler<S>(State(engine): State<Arc<SearchEngine<S>>>) -> Response
where
    S: CatalogSource + 'static,
{
    let state = engine.state();
    let results = state
        .page()
        .map(|page| page.results.as_slice())
        .unwrap_or(&[]);
    csv_response(results)
}

pub(crate) async fn export_query_handler<S>(
    State(engine): State<Arc<SearchEngine<S>>>,
    axum::Json(request): axum::Json<SearchRequest>,
) -> Response
where
    S: CatalogSource + 'static,
{
    if let Err(error) = request.filters.validate() {
        return unprocessable(error.to_string());
    }
    let pagination = match engine.pagination(request.page, request.page_size) {
        Ok(pagination) => pagination,
        Err(error) => return unprocessable(error.to_string()),
    };

    match engine
        .preview(&request.filters, pagination, request.sort)
        .await
    {
        Ok(page) => csv_response(&page.results),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}

fn csv_response(results: &[SearchResult]) -> Response {
    match export_csv(results) {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"search-results.csv\"",
                ),
            ],
            body,
        )
            .into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
