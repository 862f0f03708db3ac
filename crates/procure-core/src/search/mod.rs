//! Multi-criteria marketplace search: structured filters become a remote catalog query,
//! the returned candidates are re-filtered, scored for relevance, sorted, and paginated
//! client-side, and the engine keeps only the newest request's results visible.

pub mod catalog;
pub mod domain;
pub mod engine;
pub mod export;
pub mod filters;
pub mod pagination;
pub mod pipeline;
pub mod relevance;
pub mod router;
pub mod sort;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogBatch, CatalogError, CatalogSource};
pub use domain::{BudgetRange, EntityType, SearchCandidate, SearchFilters, SearchPage, SearchResult};
pub use engine::{SearchEngine, SearchOutcome, SearchState};
pub use export::{export_csv, ExportError};
pub use filters::{CatalogQuery, FilterError, FilterField, Predicate};
pub use pagination::Pagination;
pub use pipeline::search_candidates;
pub use relevance::relevance;
pub use router::search_router;
pub use sort::SearchSort;
