use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use procure_core::bids::{
    BidRecord, BidSortKey, BidSource, BidStatusFilter, RfqId, SortDirection, SourceError,
};
use procure_core::error::AppError;
use procure_core::format::Locale;
use procure_core::search::{
    CatalogBatch, CatalogError, CatalogQuery, CatalogSource, SearchCandidate, SearchSort,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

const DEMO_DATASET: &str = include_str!("../data/demo_marketplace.json");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Seed data for the in-memory backends.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Dataset {
    #[serde(default)]
    pub(crate) bids: Vec<BidRecord>,
    #[serde(default)]
    pub(crate) catalog: Vec<SearchCandidate>,
}

impl Dataset {
    /// Read a JSON dataset from `path`, or fall back to the bundled demo marketplace.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&raw)?)
            }
            None => Self::demo(),
        }
    }

    pub(crate) fn demo() -> Result<Self, AppError> {
        Ok(serde_json::from_str(DEMO_DATASET)?)
    }
}

/// Bid source answering from a fixed set of records grouped by RFQ.
#[derive(Debug, Default, Clone)]
pub(crate) struct InMemoryBidSource {
    by_rfq: Arc<HashMap<RfqId, Vec<BidRecord>>>,
}

impl InMemoryBidSource {
    pub(crate) fn from_records(records: Vec<BidRecord>) -> Self {
        let mut by_rfq: HashMap<RfqId, Vec<BidRecord>> = HashMap::new();
        for record in records {
            by_rfq.entry(record.rfq_id.clone()).or_default().push(record);
        }
        Self {
            by_rfq: Arc::new(by_rfq),
        }
    }

    pub(crate) fn rfq_ids(&self) -> Vec<RfqId> {
        let mut ids: Vec<RfqId> = self.by_rfq.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[async_trait]
impl BidSource for InMemoryBidSource {
    async fn bids_for_rfq(&self, rfq_id: &RfqId) -> Result<Vec<BidRecord>, SourceError> {
        self.by_rfq
            .get(rfq_id)
            .cloned()
            .ok_or_else(|| SourceError::UnknownRfq(rfq_id.0.clone()))
    }
}

/// Catalog that evaluates pushed-down predicates itself and honors the limit.
#[derive(Debug, Default, Clone)]
pub(crate) struct InMemoryCatalog {
    candidates: Arc<Vec<SearchCandidate>>,
}

impl InMemoryCatalog {
    pub(crate) fn new(candidates: Vec<SearchCandidate>) -> Self {
        Self {
            candidates: Arc::new(candidates),
        }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn query(&self, query: &CatalogQuery) -> Result<CatalogBatch, CatalogError> {
        let matching: Vec<SearchCandidate> = self
            .candidates
            .iter()
            .filter(|candidate| query.matches(candidate))
            .cloned()
            .collect();
        let total_count = matching.len();

        Ok(CatalogBatch {
            candidates: matching.into_iter().take(query.limit).collect(),
            total_count,
        })
    }
}

pub(crate) fn parse_status(raw: &str) -> Result<BidStatusFilter, String> {
    BidStatusFilter::parse(raw).ok_or_else(|| format!("unknown bid status filter '{raw}'"))
}

pub(crate) fn parse_bid_sort(raw: &str) -> Result<BidSortKey, String> {
    BidSortKey::parse(raw).ok_or_else(|| {
        format!("unknown bid sort '{raw}' (expected price, timeline, rating, submitted or score)")
    })
}

pub(crate) fn parse_direction(raw: &str) -> Result<SortDirection, String> {
    SortDirection::parse(raw).ok_or_else(|| format!("unknown sort direction '{raw}'"))
}

pub(crate) fn parse_search_sort(raw: &str) -> Result<SearchSort, String> {
    SearchSort::parse(raw).ok_or_else(|| format!("unknown search sort '{raw}'"))
}

pub(crate) fn parse_locale(raw: &str) -> Result<Locale, String> {
    Locale::parse(raw).ok_or_else(|| format!("unsupported locale '{raw}'"))
}
