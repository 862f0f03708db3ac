use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use procure_core::bids::{bid_router, BidComparisonService, BidSource};
use procure_core::search::{search_router, CatalogSource, SearchEngine};
use serde_json::json;
use std::sync::Arc;

/// Bid comparison and search APIs plus the operational endpoints.
pub(crate) fn with_marketplace_routes<B, C>(
    bids: Arc<BidComparisonService<B>>,
    search: Arc<SearchEngine<C>>,
) -> axum::Router
where
    B: BidSource + 'static,
    C: CatalogSource + 'static,
{
    bid_router(bids)
        .merge(search_router(search))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
