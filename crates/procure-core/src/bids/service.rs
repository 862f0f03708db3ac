use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::analytics::BidAnalytics;
use super::comparison::{compare, ComparisonRow, ComparisonSelection, ComparisonSummary};
use super::domain::{Bid, BidId, RfqId};
use super::ranking::{rank_bids, BidSortKey, BidStatusFilter, ScoredBid, SortDirection};
use super::repository::{BidSource, SourceError};
use super::scoring::{ScoreWeights, ScoringEngine};

/// View parameters for the bid board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidBoardQuery {
    #[serde(default)]
    pub status: BidStatusFilter,
    #[serde(default)]
    pub sort: BidSortKey,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Ranked bids for one RFQ plus analytics over the same filtered set.
#[derive(Debug, Clone, Serialize)]
pub struct BidBoard {
    pub rfq_id: RfqId,
    pub bids: Vec<ScoredBid>,
    pub analytics: BidAnalytics,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonView {
    pub rfq_id: RfqId,
    pub rows: Vec<ComparisonRow>,
    pub summary: ComparisonSummary,
}

/// Service composing the remote bid source with the scoring engine.
pub struct BidComparisonService<S> {
    source: Arc<S>,
    engine: ScoringEngine,
}

impl<S> BidComparisonService<S>
where
    S: BidSource + 'static,
{
    pub fn new(source: Arc<S>) -> Self {
        Self::with_weights(source, ScoreWeights::default())
    }

    pub fn with_weights(source: Arc<S>, weights: ScoreWeights) -> Self {
        Self {
            source,
            engine: ScoringEngine::new(weights),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Fetch and normalize the bid set for `rfq_id`.
    pub async fn bids(&self, rfq_id: &RfqId) -> Result<Vec<Bid>, BidServiceError> {
        let records = self.source.bids_for_rfq(rfq_id).await?;
        let fetched = records.len();

        let bids: Vec<Bid> = records
            .into_iter()
            .filter(|record| {
                let belongs = record.rfq_id == *rfq_id;
                if !belongs {
                    warn!(
                        rfq_id = %rfq_id.0,
                        bid_id = %record.id.0,
                        other_rfq = %record.rfq_id.0,
                        "dropping bid that belongs to another request for quotation"
                    );
                }
                belongs
            })
            .map(Bid::from_record)
            .collect();

        debug!(rfq_id = %rfq_id.0, fetched, kept = bids.len(), "loaded bid set");
        Ok(bids)
    }

    /// Rank the RFQ's bids and compute analytics over the filtered set.
    pub async fn board(
        &self,
        rfq_id: &RfqId,
        query: BidBoardQuery,
    ) -> Result<BidBoard, BidServiceError> {
        let bids = self.bids(rfq_id).await?;
        let ranked = rank_bids(
            &bids,
            &self.engine,
            query.status,
            query.sort,
            query.direction,
        );
        let analytics = BidAnalytics::from_bids(ranked.iter().map(|scored| &scored.bid));

        Ok(BidBoard {
            rfq_id: rfq_id.clone(),
            bids: ranked,
            analytics,
        })
    }

    /// Side-by-side comparison of the selected bids that still exist.
    pub async fn compare(
        &self,
        rfq_id: &RfqId,
        selected: Vec<BidId>,
    ) -> Result<ComparisonView, BidServiceError> {
        let bids = self.bids(rfq_id).await?;
        let selection = ComparisonSelection::from_ids(selected);
        let rows = compare(&bids, &selection, &self.engine);

        if rows.len() < selection.len() {
            debug!(
                rfq_id = %rfq_id.0,
                requested = selection.len(),
                resolved = rows.len(),
                "ignored comparison ids that no longer resolve"
            );
        }

        let summary = ComparisonSummary::from_rows(&rows);
        Ok(ComparisonView {
            rfq_id: rfq_id.clone(),
            rows,
            summary,
        })
    }
}

/// Error raised by the bid comparison service.
#[derive(Debug, thiserror::Error)]
pub enum BidServiceError {
    #[error(transparent)]
    Source(#[from] SourceError),
}
