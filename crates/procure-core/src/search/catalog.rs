use async_trait::async_trait;

use super::domain::SearchCandidate;
use super::filters::CatalogQuery;

/// Remote boundary serving requests, offers, and vendors for search.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn query(&self, query: &CatalogQuery) -> Result<CatalogBatch, CatalogError>;
}

/// Candidates returned for one query. `total_count` may exceed `candidates.len()`
/// when the backend truncated to the requested limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogBatch {
    pub candidates: Vec<SearchCandidate>,
    pub total_count: usize,
}

impl CatalogBatch {
    pub fn new(candidates: Vec<SearchCandidate>) -> Self {
        let total_count = candidates.len();
        Self {
            candidates,
            total_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
    #[error("catalog rejected the query: {0}")]
    Rejected(String),
}
