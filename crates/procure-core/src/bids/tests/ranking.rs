use super::common::*;

use crate::bids::domain::BidStatus;
use crate::bids::ranking::{rank_bids, BidSortKey, BidStatusFilter, SortDirection};
use crate::bids::scoring::ScoringEngine;

fn ranked_ids(key: BidSortKey, direction: SortDirection) -> Vec<String> {
    let ranked = rank_bids(
        &sample_bids(),
        &ScoringEngine::default(),
        BidStatusFilter::All,
        key,
        direction,
    );
    scored_ids(&ranked)
}

#[test]
fn sorts_by_price_ascending() {
    assert_eq!(
        ranked_ids(BidSortKey::Price, SortDirection::Asc),
        vec!["bid-b", "bid-e", "bid-d", "bid-a", "bid-c"]
    );
}

#[test]
fn price_descending_is_the_exact_reverse_of_ascending() {
    let mut ascending = ranked_ids(BidSortKey::Price, SortDirection::Asc);
    ascending.reverse();
    assert_eq!(ascending, ranked_ids(BidSortKey::Price, SortDirection::Desc));
}

#[test]
fn sorts_by_timeline_and_submission_time() {
    assert_eq!(
        ranked_ids(BidSortKey::Timeline, SortDirection::Asc),
        vec!["bid-c", "bid-e", "bid-a", "bid-b", "bid-d"]
    );
    assert_eq!(
        ranked_ids(BidSortKey::Submitted, SortDirection::Desc),
        vec!["bid-e", "bid-c", "bid-a", "bid-d", "bid-b"]
    );
}

#[test]
fn rating_sort_treats_missing_rating_as_zero() {
    let ranked = ranked_ids(BidSortKey::Rating, SortDirection::Desc);
    assert_eq!(ranked.first().map(String::as_str), Some("bid-b"));
    assert_eq!(ranked.last().map(String::as_str), Some("bid-d"));
}

#[test]
fn ties_keep_source_order_in_both_directions() {
    let bids = vec![
        bid("tie-1", 100_000.0, 10),
        bid("tie-2", 100_000.0, 10),
        bid("cheap", 50_000.0, 10),
    ];
    let engine = ScoringEngine::default();

    let asc = rank_bids(&bids, &engine, BidStatusFilter::All, BidSortKey::Price, SortDirection::Asc);
    let desc = rank_bids(&bids, &engine, BidStatusFilter::All, BidSortKey::Price, SortDirection::Desc);

    assert_eq!(scored_ids(&asc), vec!["cheap", "tie-1", "tie-2"]);
    assert_eq!(scored_ids(&desc), vec!["tie-1", "tie-2", "cheap"]);
}

#[test]
fn status_filter_keeps_exact_matches_only() {
    let ranked = rank_bids(
        &sample_bids(),
        &ScoringEngine::default(),
        BidStatusFilter::Only(BidStatus::Submitted),
        BidSortKey::Price,
        SortDirection::Asc,
    );

    assert_eq!(scored_ids(&ranked), vec!["bid-a", "bid-c"]);
    assert!(ranked.iter().all(|scored| scored.bid.status == BidStatus::Submitted));
}

#[test]
fn ranking_attaches_composite_scores() {
    let engine = ScoringEngine::default();
    let ranked = rank_bids(
        &sample_bids(),
        &engine,
        BidStatusFilter::All,
        BidSortKey::Score,
        SortDirection::Desc,
    );

    for scored in &ranked {
        assert_eq!(scored.score, engine.score(&scored.bid));
    }
    assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn parses_query_string_values() {
    assert_eq!(BidStatusFilter::parse("all"), Some(BidStatusFilter::All));
    assert_eq!(
        BidStatusFilter::parse("Under_Review"),
        Some(BidStatusFilter::Only(BidStatus::UnderReview))
    );
    assert_eq!(BidStatusFilter::parse("archived"), None);
    assert_eq!(BidSortKey::parse("timeline"), Some(BidSortKey::Timeline));
    assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Desc));
}

#[test]
fn empty_input_produces_empty_ranking() {
    let ranked = rank_bids(
        &[],
        &ScoringEngine::default(),
        BidStatusFilter::All,
        BidSortKey::Price,
        SortDirection::Asc,
    );
    assert!(ranked.is_empty());
}
