//! Bid comparison for a single request-for-quotation: composite scoring, status filtering
//! and sorting, side-by-side comparison, and price/timeline analytics.
//!
//! Everything below `service` is a pure function of an already fetched bid set; the
//! service is the only layer that talks to the remote [`BidSource`].

pub mod analytics;
pub mod comparison;
pub mod domain;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use analytics::{BidAnalytics, PriceDistributionEntry, StatusCount};
pub use comparison::{compare, ComparisonRow, ComparisonSelection, ComparisonSummary};
pub use domain::{Bid, BidId, BidRecord, BidStatus, RfqId, VendorId, VendorProfile};
pub use ranking::{rank_bids, BidSortKey, BidStatusFilter, ScoredBid, SortDirection};
pub use repository::{BidSource, SourceError};
pub use router::bid_router;
pub use scoring::{ScoreComponent, ScoreFactor, ScoreWeights, ScoringEngine, VendorMetrics};
pub use service::{BidBoard, BidBoardQuery, BidComparisonService, BidServiceError, ComparisonView};
