use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::bids::domain::{Bid, BidId, BidRecord, BidStatus, RfqId, VendorId, VendorProfile};
use crate::bids::repository::{BidSource, SourceError};
use crate::bids::ranking::ScoredBid;
use crate::bids::{bid_router, BidComparisonService};

pub(super) fn rfq() -> RfqId {
    RfqId("rfq-2024-017".to_string())
}

pub(super) fn submitted_at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn vendor(id: &str, name: &str, quality: Option<f64>, completion: Option<f64>) -> VendorProfile {
    VendorProfile {
        vendor_id: VendorId(id.to_string()),
        company_name: name.to_string(),
        quality_score: quality,
        completion_rate: completion,
        response_time_hours: Some(6.0),
        completed_orders: Some(42),
    }
}

pub(super) fn record(id: &str, price: f64, days: u32, status: BidStatus, day: u32) -> BidRecord {
    BidRecord {
        id: BidId(id.to_string()),
        rfq_id: rfq(),
        vendor_id: VendorId(format!("vendor-{id}")),
        total_price: price,
        currency: "INR".to_string(),
        delivery_timeline_days: days,
        warranty_period_months: Some(12),
        status,
        submitted_at: submitted_at(day),
        vendor: Some(vendor(
            &format!("vendor-{id}"),
            &format!("Vendor {id}"),
            Some(4.0),
            Some(90.0),
        )),
    }
}

pub(super) fn bid(id: &str, price: f64, days: u32) -> Bid {
    Bid::from_record(record(id, price, days, BidStatus::Submitted, 1))
}

pub(super) fn bid_without_history(id: &str, price: f64, days: u32) -> Bid {
    let mut record = record(id, price, days, BidStatus::Submitted, 1);
    record.vendor = None;
    Bid::from_record(record)
}

/// Five bids with distinct prices, timelines, and statuses.
pub(super) fn sample_records() -> Vec<BidRecord> {
    let mut records = vec![
        record("bid-a", 450_000.0, 30, BidStatus::Submitted, 3),
        record("bid-b", 380_000.0, 45, BidStatus::UnderReview, 1),
        record("bid-c", 520_000.0, 20, BidStatus::Submitted, 4),
        record("bid-d", 410_000.0, 60, BidStatus::Rejected, 2),
        record("bid-e", 395_000.0, 25, BidStatus::Accepted, 5),
    ];
    records[1].vendor = Some(vendor("vendor-bid-b", "Shree Fabricators", Some(4.6), Some(98.0)));
    records[3].vendor = None;
    records
}

pub(super) fn sample_bids() -> Vec<Bid> {
    sample_records().into_iter().map(Bid::from_record).collect()
}

#[derive(Default)]
pub(super) struct MemoryBidSource {
    records: Mutex<HashMap<RfqId, Vec<BidRecord>>>,
}

impl MemoryBidSource {
    pub(super) fn with_records(rfq_id: RfqId, records: Vec<BidRecord>) -> Self {
        let source = Self::default();
        source
            .records
            .lock()
            .expect("source mutex poisoned")
            .insert(rfq_id, records);
        source
    }
}

#[async_trait]
impl BidSource for MemoryBidSource {
    async fn bids_for_rfq(&self, rfq_id: &RfqId) -> Result<Vec<BidRecord>, SourceError> {
        let guard = self.records.lock().expect("source mutex poisoned");
        guard
            .get(rfq_id)
            .cloned()
            .ok_or_else(|| SourceError::UnknownRfq(rfq_id.0.clone()))
    }
}

pub(super) struct UnavailableSource;

#[async_trait]
impl BidSource for UnavailableSource {
    async fn bids_for_rfq(&self, _rfq_id: &RfqId) -> Result<Vec<BidRecord>, SourceError> {
        Err(SourceError::Unavailable("connection reset".to_string()))
    }
}

pub(super) fn build_service() -> BidComparisonService<MemoryBidSource> {
    let source = Arc::new(MemoryBidSource::with_records(rfq(), sample_records()));
    BidComparisonService::new(source)
}

pub(super) fn router_with_service<S>(service: BidComparisonService<S>) -> axum::Router
where
    S: BidSource + 'static,
{
    bid_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn scored_ids(ranked: &[ScoredBid]) -> Vec<String> {
    ranked.iter().map(|scored| scored.bid.id.0.clone()).collect()
}
