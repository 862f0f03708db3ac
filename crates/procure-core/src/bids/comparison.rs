use serde::{Deserialize, Serialize};

use super::domain::{Bid, BidId};
use super::scoring::ScoringEngine;

/// Multi-select state backing the detailed comparison view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSelection {
    ids: Vec<BidId>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = BidId>,
    {
        let mut selection = Self::new();
        for id in ids {
            selection.select(id);
        }
        selection
    }

    /// Add `id` unless it is already selected.
    pub fn select(&mut self, id: BidId) {
        if !self.contains(&id) {
            self.ids.push(id);
        }
    }

    /// Flip membership of `id`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: BidId) -> bool {
        if let Some(position) = self.ids.iter().position(|selected| *selected == id) {
            self.ids.remove(position);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: &BidId) -> bool {
        self.ids.iter().any(|selected| selected == id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[BidId] {
        &self.ids
    }
}

/// Side-by-side projection of one selected bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub bid_id: BidId,
    pub vendor_name: String,
    pub price: f64,
    pub currency: String,
    pub timeline_days: u32,
    pub score: u8,
    pub rating: Option<f64>,
    pub completion_rate: Option<f64>,
    pub warranty_months: Option<u32>,
}

/// Standout bids among the compared rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub lowest_price: Option<BidId>,
    pub fastest_delivery: Option<BidId>,
    pub best_score: Option<BidId>,
}

/// Project the selected bids that still exist in `bids`, in source order.
///
/// Selected ids that no longer resolve are dropped without error.
pub fn compare(
    bids: &[Bid],
    selection: &ComparisonSelection,
    engine: &ScoringEngine,
) -> Vec<ComparisonRow> {
    bids.iter()
        .filter(|bid| selection.contains(&bid.id))
        .map(|bid| ComparisonRow {
            bid_id: bid.id.clone(),
            vendor_name: bid.vendor_name.clone(),
            price: bid.total_price,
            currency: bid.currency.clone(),
            timeline_days: bid.delivery_timeline_days,
            score: engine.score(bid),
            rating: bid.vendor_quality_score,
            completion_rate: bid.vendor_completion_rate,
            warranty_months: bid.warranty_period_months,
        })
        .collect()
}

impl ComparisonSummary {
    /// First row wins ties so the summary is stable for a given row order.
    pub fn from_rows(rows: &[ComparisonRow]) -> Self {
        let lowest_price = rows
            .iter()
            .reduce(|best, row| if row.price < best.price { row } else { best })
            .map(|row| row.bid_id.clone());
        let fastest_delivery = rows
            .iter()
            .reduce(|best, row| {
                if row.timeline_days < best.timeline_days {
                    row
                } else {
                    best
                }
            })
            .map(|row| row.bid_id.clone());
        let best_score = rows
            .iter()
            .reduce(|best, row| if row.score > best.score { row } else { best })
            .map(|row| row.bid_id.clone());

        Self {
            lowest_price,
            fastest_delivery,
            best_score,
        }
    }
}
