use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Entity families the marketplace search spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Request,
    Offer,
    Vendor,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Request => "request",
            EntityType::Offer => "offer",
            EntityType::Vendor => "vendor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityType::Request => "Request",
            EntityType::Offer => "Offer",
            EntityType::Vendor => "Vendor",
        }
    }
}

/// Inclusive price window; `max: None` leaves the upper end open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl Default for BudgetRange {
    fn default() -> Self {
        Self { min: 0.0, max: None }
    }
}

impl BudgetRange {
    pub fn new(min: f64, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min <= 0.0 && self.max.is_none()
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.map(|max| price <= max).unwrap_or(true)
    }
}

/// Structured query descriptor collected from the search form.
///
/// Empty strings and `"all"` in the categorical fields mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub query: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub urgency: Option<String>,
    pub entity_type: Option<String>,
    pub budget_range: BudgetRange,
    /// Minimum rating; 0 disables the constraint.
    pub rating: f64,
    pub availability: bool,
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: BTreeSet<String>,
}

impl SearchFilters {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Add a tag after normalization; blank tags are ignored.
    pub fn add_tag(&mut self, tag: &str) {
        if let Some(tag) = normalize_tag(tag) {
            self.tags.insert(tag);
        }
    }

    pub fn remove_tag(&mut self, tag: &str) {
        if let Some(tag) = normalize_tag(tag) {
            self.tags.remove(&tag);
        }
    }
}

pub(crate) fn normalize_tag(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.iter().filter_map(|tag| normalize_tag(tag)).collect())
}

/// Raw entity row returned by the catalog backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub id: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    pub status: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub available: bool,
    pub created_at: DateTime<Utc>,
    /// Backend-computed relevance, when the backend ranks results itself.
    #[serde(default)]
    pub relevance: Option<f64>,
}

/// One ranked search hit. Built fresh per query and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub rating: Option<f64>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    /// 0..=100.
    pub relevance: f64,
}

impl SearchResult {
    pub(crate) fn from_candidate(candidate: SearchCandidate, relevance: f64) -> Self {
        Self {
            id: candidate.id,
            entity_type: candidate.entity_type,
            title: candidate.title,
            description: candidate.description,
            location: candidate.location,
            price: candidate.price,
            currency: candidate.currency,
            rating: candidate.rating,
            status: candidate.status,
            created_at: candidate.created_at,
            relevance,
        }
    }
}

/// One page of the ranked result set plus the true total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub results: Vec<SearchResult>,
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}
