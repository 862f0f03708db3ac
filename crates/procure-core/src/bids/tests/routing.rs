use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;

use crate::bids::service::BidComparisonService;

#[tokio::test]
async fn board_route_applies_query_parameters() {
    let router = router_with_service(build_service());

    let response = router
        .oneshot(
            axum::http::Request::get(
                "/api/v1/rfqs/rfq-2024-017/bids?status=all&sort=price&direction=desc",
            )
            .body(axum::body::Body::empty())
            .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let ids: Vec<&str> = body["bids"]
        .as_array()
        .expect("bids array")
        .iter()
        .map(|bid| bid["id"].as_str().expect("id string"))
        .collect();
    assert_eq!(ids, vec!["bid-c", "bid-a", "bid-d", "bid-e", "bid-b"]);
    assert_eq!(body["analytics"]["count"], json!(5));
}

#[tokio::test]
async fn board_route_rejects_unknown_sort_key() {
    let router = router_with_service(build_service());

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/rfqs/rfq-2024-017/bids?sort=cheapest")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn board_route_returns_not_found_for_unknown_rfq() {
    let router = router_with_service(build_service());

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/rfqs/rfq-missing/bids")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn board_route_maps_backend_outage_to_bad_gateway() {
    let router = router_with_service(BidComparisonService::new(std::sync::Arc::new(
        UnavailableSource,
    )));

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/rfqs/rfq-2024-017/bids")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn compare_route_returns_rows_for_known_ids() {
    let router = router_with_service(build_service());
    let payload = json!({ "bid_ids": ["bid-a", "bid-zzz"] });

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/rfqs/rfq-2024-017/bids/compare")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["rows"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["rows"][0]["bid_id"], json!("bid-a"));
    assert_eq!(body["summary"]["lowest_price"], json!("bid-a"));
}
