use serde::Serialize;

use super::domain::{Bid, BidId, BidStatus};

/// Aggregate view over the currently filtered bid set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BidAnalytics {
    pub count: usize,
    pub average_price: u64,
    pub average_timeline_days: u64,
    pub lowest_price: Option<f64>,
    pub highest_price: Option<f64>,
    pub distribution: Vec<PriceDistributionEntry>,
    pub status_breakdown: Vec<StatusCount>,
}

/// Bar length for one bid relative to the most expensive bid in the set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceDistributionEntry {
    pub bid_id: BidId,
    pub vendor_name: String,
    pub price: f64,
    /// `price / max(price) * 100`, or 0 when every price is 0.
    pub percent_of_max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: BidStatus,
    pub status_label: &'static str,
    pub count: usize,
}

impl BidAnalytics {
    pub fn from_bids<'a, I>(bids: I) -> Self
    where
        I: IntoIterator<Item = &'a Bid>,
    {
        let bids: Vec<&Bid> = bids.into_iter().collect();
        let count = bids.len();

        let (average_price, average_timeline_days) = if count == 0 {
            (0, 0)
        } else {
            let price_total: f64 = bids.iter().map(|bid| bid.total_price).sum();
            let timeline_total: f64 = bids
                .iter()
                .map(|bid| f64::from(bid.delivery_timeline_days))
                .sum();
            (
                (price_total / count as f64).round() as u64,
                (timeline_total / count as f64).round() as u64,
            )
        };

        let lowest_price = bids
            .iter()
            .map(|bid| bid.total_price)
            .reduce(f64::min);
        let highest_price = bids
            .iter()
            .map(|bid| bid.total_price)
            .reduce(f64::max);

        let max_price = highest_price.unwrap_or(0.0);
        let distribution = bids
            .iter()
            .map(|bid| PriceDistributionEntry {
                bid_id: bid.id.clone(),
                vendor_name: bid.vendor_name.clone(),
                price: bid.total_price,
                percent_of_max: if max_price > 0.0 {
                    bid.total_price / max_price * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        let status_breakdown = BidStatus::ordered()
            .into_iter()
            .map(|status| StatusCount {
                status,
                status_label: status.label(),
                count: bids.iter().filter(|bid| bid.status == status).count(),
            })
            .filter(|entry| entry.count > 0)
            .collect();

        Self {
            count,
            average_price,
            average_timeline_days,
            lowest_price,
            highest_price,
            distribution,
            status_breakdown,
        }
    }
}
