use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;
use tokio::sync::Notify;

use crate::config::SearchConfig;
use crate::search::catalog::{CatalogBatch, CatalogError, CatalogSource};
use crate::search::domain::{EntityType, SearchCandidate};
use crate::search::filters::{CatalogQuery, Predicate};
use crate::search::{search_router, SearchEngine};

pub(super) fn created(day: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0)
        .single()
        .expect("valid timestamp")
        + Duration::days(day)
}

pub(super) fn candidate(id: &str, entity_type: EntityType, title: &str) -> SearchCandidate {
    SearchCandidate {
        id: id.to_string(),
        entity_type,
        title: title.to_string(),
        description: String::new(),
        category: None,
        location: None,
        urgency: None,
        price: None,
        currency: None,
        rating: None,
        status: "active".to_string(),
        tags: Vec::new(),
        available: false,
        created_at: created(0),
        relevance: None,
    }
}

/// A small mixed catalog of requests, offers, and vendors.
pub(super) fn catalog() -> Vec<SearchCandidate> {
    let mut steel = candidate("req-1", EntityType::Request, "Structural steel beams");
    steel.description = "Need 40 tonnes of I-section beams for warehouse".to_string();
    steel.category = Some("construction".to_string());
    steel.location = Some("Pune".to_string());
    steel.urgency = Some("high".to_string());
    steel.price = Some(1_800_000.0);
    steel.currency = Some("INR".to_string());
    steel.tags = vec!["steel".to_string(), "bulk".to_string()];
    steel.created_at = created(3);

    let mut cement = candidate("req-2", EntityType::Request, "Cement bags, grade 53");
    cement.description = "Monthly supply for site B".to_string();
    cement.category = Some("construction".to_string());
    cement.location = Some("Mumbai".to_string());
    cement.urgency = Some("medium".to_string());
    cement.price = Some(250_000.0);
    cement.currency = Some("INR".to_string());
    cement.tags = vec!["cement".to_string()];
    cement.created_at = created(5);

    let mut laptops = candidate("offer-1", EntityType::Offer, "Refurbished laptops");
    laptops.description = "Batch of 50 business laptops with warranty".to_string();
    laptops.category = Some("electronics".to_string());
    laptops.location = Some("Bengaluru".to_string());
    laptops.price = Some(900_000.0);
    laptops.currency = Some("INR".to_string());
    laptops.rating = Some(4.2);
    laptops.tags = vec!["it".to_string(), "Bulk".to_string()];
    laptops.available = true;
    laptops.created_at = created(1);

    let mut fabricator = candidate("vendor-1", EntityType::Vendor, "Shree Fabricators");
    fabricator.description = "Steel fabrication and welding services".to_string();
    fabricator.category = Some("construction".to_string());
    fabricator.location = Some("Pune".to_string());
    fabricator.rating = Some(4.7);
    fabricator.tags = vec!["steel".to_string(), "welding".to_string()];
    fabricator.available = true;
    fabricator.created_at = created(2);

    let mut logistics = candidate("vendor-2", EntityType::Vendor, "Konkan Logistics");
    logistics.description = "Full truckload transport across Maharashtra".to_string();
    logistics.category = Some("logistics".to_string());
    logistics.location = Some("Mumbai".to_string());
    logistics.rating = Some(3.9);
    logistics.tags = vec!["transport".to_string()];
    logistics.available = false;
    logistics.created_at = created(4);

    vec![steel, cement, laptops, fabricator, logistics]
}

/// `count` interchangeable offers named `Item 01`, `Item 02`, ...
pub(super) fn numbered(count: usize) -> Vec<SearchCandidate> {
    (1..=count)
        .map(|n| candidate(&format!("item-{n:02}"), EntityType::Offer, &format!("Item {n:02}")))
        .collect()
}

pub(super) fn result_ids(results: &[crate::search::SearchResult]) -> Vec<String> {
    results.iter().map(|result| result.id.clone()).collect()
}

pub(super) struct MemoryCatalog {
    candidates: Vec<SearchCandidate>,
}

impl MemoryCatalog {
    pub(super) fn new(candidates: Vec<SearchCandidate>) -> Self {
        Self { candidates }
    }
}

#[async_trait]
impl CatalogSource for MemoryCatalog {
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

pub(super) struct FailingCatalog;

#[async_trait]
impl CatalogSource for FailingCatalog {
    async fn query(&self, _query: &CatalogQuery) -> Result<CatalogBatch, CatalogError> {
        Err(CatalogError::Unavailable("upstream timeout".to_string()))
    }
}

/// Holds any query whose text contains "slow" until `release` is notified.
pub(super) struct GatedCatalog {
    inner: MemoryCatalog,
    pub(super) entered: Notify,
    pub(super) release: Notify,
}

impl GatedCatalog {
    pub(super) fn new(candidates: Vec<SearchCandidate>) -> Self {
        Self {
            inner: MemoryCatalog::new(candidates),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl CatalogSource for GatedCatalog {
    async fn query(&self, query: &CatalogQuery) -> Result<CatalogBatch, CatalogError> {
        let slow = query.predicates.iter().any(|predicate| {
            matches!(predicate, Predicate::Text { query } if query.contains("slow"))
        });
        if slow {
            self.entered.notify_one();
            self.release.notified().await;
            return Ok(CatalogBatch::new(numbered(3)));
        }
        self.inner.query(query).await
    }
}

pub(super) fn engine_with<S>(source: S) -> SearchEngine<S>
where
    S: CatalogSource + 'static,
{
    SearchEngine::new(Arc::new(source), SearchConfig::default())
}

pub(super) fn router_with<S>(source: S) -> axum::Router
where
    S: CatalogSource + 'static,
{
    search_router(Arc::new(engine_with(source)))
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("json payload")
}
