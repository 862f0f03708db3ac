use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::SearchResult;

/// Result ordering; relevance (highest first) unless the caller asks otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSort {
    #[default]
    Relevance,
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
    Rating,
}

impl SearchSort {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "relevance" => Some(Self::Relevance),
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            "price_asc" => Some(Self::PriceAsc),
            "price_desc" => Some(Self::PriceDesc),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }

    /// Stable in place; entities missing the sort attribute sink to the end.
    pub fn apply(&self, results: &mut [SearchResult]) {
        match self {
            SearchSort::Relevance => {
                results.sort_by(|left, right| right.relevance.total_cmp(&left.relevance))
            }
            SearchSort::Newest => {
                results.sort_by(|left, right| right.created_at.cmp(&left.created_at))
            }
            SearchSort::Oldest => {
                results.sort_by(|left, right| left.created_at.cmp(&right.created_at))
            }
            SearchSort::PriceAsc => results.sort_by(|left, right| {
                missing_last(left.price, right.price, |l, r| l.total_cmp(&r))
            }),
            SearchSort::PriceDesc => results.sort_by(|left, right| {
                missing_last(left.price, right.price, |l, r| r.total_cmp(&l))
            }),
            SearchSort::Rating => results.sort_by(|left, right| {
                missing_last(left.rating, right.rating, |l, r| r.total_cmp(&l))
            }),
        }
    }
}

fn missing_last(
    left: Option<f64>,
    right: Option<f64>,
    present: impl Fn(f64, f64) -> Ordering,
) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => present(left, right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
