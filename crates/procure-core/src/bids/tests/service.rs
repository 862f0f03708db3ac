use std::sync::Arc;

use super::common::*;

use crate::bids::domain::{BidId, BidStatus, RfqId};
use crate::bids::ranking::{BidSortKey, BidStatusFilter, SortDirection};
use crate::bids::repository::SourceError;
use crate::bids::service::{BidBoardQuery, BidComparisonService, BidServiceError};

#[tokio::test]
async fn board_ranks_and_summarizes_the_filtered_set() {
    let service = build_service();
    let board = service
        .board(
            &rfq(),
            BidBoardQuery {
                status: BidStatusFilter::Only(BidStatus::Submitted),
                sort: BidSortKey::Timeline,
                direction: SortDirection::Asc,
            },
        )
        .await
        .expect("board loads");

    assert_eq!(scored_ids(&board.bids), vec!["bid-c", "bid-a"]);
    assert_eq!(board.analytics.count, 2);
    assert_eq!(board.analytics.average_price, 485_000);
    assert_eq!(board.analytics.average_timeline_days, 25);
}

#[tokio::test]
async fn bids_from_other_rfqs_are_dropped() {
    let mut records = sample_records();
    records[0].rfq_id = RfqId("rfq-other".to_string());
    let service = BidComparisonService::new(Arc::new(MemoryBidSource::with_records(rfq(), records)));

    let bids = service.bids(&rfq()).await.expect("bids load");
    assert_eq!(bids.len(), 4);
    assert!(bids.iter().all(|bid| bid.rfq_id == rfq()));
}

#[tokio::test]
async fn missing_vendor_join_falls_back_to_vendor_id() {
    let service = build_service();
    let bids = service.bids(&rfq()).await.expect("bids load");

    let orphan = bids
        .iter()
        .find(|bid| bid.id == BidId("bid-d".to_string()))
        .expect("bid-d present");
    assert_eq!(orphan.vendor_name, "vendor-bid-d");
    assert_eq!(orphan.vendor_quality_score, None);
}

#[tokio::test]
async fn compare_reports_rows_and_summary() {
    let service = build_service();
    let view = service
        .compare(
            &rfq(),
            vec![
                BidId("bid-b".to_string()),
                BidId("bid-e".to_string()),
                BidId("bid-gone".to_string()),
            ],
        )
        .await
        .expect("comparison loads");

    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.summary.lowest_price, Some(BidId("bid-b".to_string())));
    assert_eq!(view.summary.fastest_delivery, Some(BidId("bid-e".to_string())));
}

#[tokio::test]
async fn source_failures_surface_as_service_errors() {
    let service = BidComparisonService::new(Arc::new(UnavailableSource));
    let error = service
        .board(&rfq(), BidBoardQuery::default())
        .await
        .expect_err("source is down");

    assert!(matches!(
        error,
        BidServiceError::Source(SourceError::Unavailable(_))
    ));
}
