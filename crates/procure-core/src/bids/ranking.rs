use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::{Bid, BidStatus};
use super::scoring::{ScoringEngine, VendorMetrics};

/// Status constraint applied before sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidStatusFilter {
    #[default]
    All,
    Only(BidStatus),
}

impl BidStatusFilter {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Some(Self::All),
            "submitted" => Some(Self::Only(BidStatus::Submitted)),
            "under_review" => Some(Self::Only(BidStatus::UnderReview)),
            "accepted" => Some(Self::Only(BidStatus::Accepted)),
            "rejected" => Some(Self::Only(BidStatus::Rejected)),
            _ => None,
        }
    }

    pub fn admits(&self, status: BidStatus) -> bool {
        match self {
            BidStatusFilter::All => true,
            BidStatusFilter::Only(expected) => *expected == status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidSortKey {
    #[default]
    Price,
    Timeline,
    Rating,
    Submitted,
    Score,
}

impl BidSortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "price" => Some(Self::Price),
            "timeline" => Some(Self::Timeline),
            "rating" => Some(Self::Rating),
            "submitted" => Some(Self::Submitted),
            "score" => Some(Self::Score),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// A bid paired with its composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBid {
    #[serde(flatten)]
    pub bid: Bid,
    pub score: u8,
}

/// Filter by status and order by `key`, returning a new sequence.
///
/// The sort is stable in both directions: descending flips the comparator instead of
/// reversing the output, so tied bids keep their source order either way.
pub fn rank_bids(
    bids: &[Bid],
    engine: &ScoringEngine,
    filter: BidStatusFilter,
    key: BidSortKey,
    direction: SortDirection,
) -> Vec<ScoredBid> {
    let mut ranked: Vec<ScoredBid> = bids
        .iter()
        .filter(|bid| filter.admits(bid.status))
        .map(|bid| ScoredBid {
            score: engine.score(bid),
            bid: bid.clone(),
        })
        .collect();

    ranked.sort_by(|left, right| {
        let ordering = compare_by_key(left, right, key);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    ranked
}

fn compare_by_key(left: &ScoredBid, right: &ScoredBid, key: BidSortKey) -> Ordering {
    match key {
        BidSortKey::Price => left.bid.total_price.total_cmp(&right.bid.total_price),
        BidSortKey::Timeline => left
            .bid
            .delivery_timeline_days
            .cmp(&right.bid.delivery_timeline_days),
        BidSortKey::Rating => {
            let left_rating = VendorMetrics::from_bid(&left.bid).quality_score;
            let right_rating = VendorMetrics::from_bid(&right.bid).quality_score;
            left_rating.total_cmp(&right_rating)
        }
        BidSortKey::Submitted => left.bid.submitted_at.cmp(&right.bid.submitted_at),
        BidSortKey::Score => left.score.cmp(&right.score),
    }
}
