use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{BidId, RfqId};
use super::ranking::{BidSortKey, BidStatusFilter, SortDirection};
use super::repository::{BidSource, SourceError};
use super::service::{BidBoardQuery, BidComparisonService, BidServiceError};

/// Router builder exposing the bid board and comparison endpoints.
pub fn bid_router<S>(service: Arc<BidComparisonService<S>>) -> Router
where
    S: BidSource + 'static,
{
    Router::new()
        .route("/api/v1/rfqs/:rfq_id/bids", get(board_handler::<S>))
        .route(
            "/api/v1/rfqs/:rfq_id/bids/compare",
            post(compare_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BoardParams {
    status: Option<String>,
    sort: Option<String>,
    direction: Option<String>,
}

impl BoardParams {
    fn into_query(self) -> Result<BidBoardQuery, String> {
        let status = match self.status.as_deref() {
            Some(raw) => {
                BidStatusFilter::parse(raw).ok_or_else(|| format!("unknown status '{raw}'"))?
            }
            None => BidStatusFilter::All,
        };
        let sort = match self.sort.as_deref() {
            Some(raw) => BidSortKey::parse(raw).ok_or_else(|| format!("unknown sort '{raw}'"))?,
            None => BidSortKey::default(),
        };
        let direction = match self.direction.as_deref() {
            Some(raw) => {
                SortDirection::parse(raw).ok_or_else(|| format!("unknown direction '{raw}'"))?
            }
            None => SortDirection::default(),
        };

        Ok(BidBoardQuery {
            status,
            sort,
            direction,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompareRequest {
    bid_ids: Vec<BidId>,
}

pub(crate) async fn board_handler<S>(
    State(service): State<Arc<BidComparisonService<S>>>,
    Path(rfq_id): Path<String>,
    Query(params): Query<BoardParams>,
) -> Response
where
    S: BidSource + 'static,
{
    let query = match params.into_query() {
        Ok(query) => query,
        Err(message) => {
            let payload = json!({ "error": message });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    match service.board(&RfqId(rfq_id), query).await {
        Ok(board) => (StatusCode::OK, axum::Json(board)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn compare_handler<S>(
    State(service): State<Arc<BidComparisonService<S>>>,
    Path(rfq_id): Path<String>,
    axum::Json(request): axum::Json<CompareRequest>,
) -> Response
where
    S: BidSource + 'static,
{
    match service.compare(&RfqId(rfq_id), request.bid_ids).await {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => service_error_response(error),
    }
}

fn service_error_response(error: BidServiceError) -> Response {
    let status = match &error {
        BidServiceError::Source(SourceError::UnknownRfq(_)) => StatusCode::NOT_FOUND,
        BidServiceError::Source(_) => StatusCode::BAD_GATEWAY,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
