use super::common::*;

use crate::bids::comparison::{compare, ComparisonSelection, ComparisonSummary};
use crate::bids::domain::BidId;
use crate::bids::scoring::ScoringEngine;

fn selection(ids: &[&str]) -> ComparisonSelection {
    ComparisonSelection::from_ids(ids.iter().map(|id| BidId(id.to_string())))
}

#[test]
fn projects_selected_bids_in_source_order() {
    let engine = ScoringEngine::default();
    let bids = sample_bids();
    let rows = compare(&bids, &selection(&["bid-e", "bid-a"]), &engine);

    let ids: Vec<&str> = rows.iter().map(|row| row.bid_id.0.as_str()).collect();
    assert_eq!(ids, vec!["bid-a", "bid-e"]);

    let first = &rows[0];
    assert_eq!(first.price, 450_000.0);
    assert_eq!(first.timeline_days, 30);
    assert_eq!(first.rating, Some(4.0));
    assert_eq!(first.completion_rate, Some(90.0));
    assert_eq!(first.score, engine.score(&bids[0]));
}

#[test]
fn unknown_ids_are_silently_dropped() {
    let rows = compare(
        &sample_bids(),
        &selection(&["bid-b", "bid-withdrawn"]),
        &ScoringEngine::default(),
    );

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].bid_id, BidId("bid-b".to_string()));
}

#[test]
fn empty_selection_yields_no_rows() {
    let rows = compare(&sample_bids(), &ComparisonSelection::new(), &ScoringEngine::default());
    assert!(rows.is_empty());
    assert_eq!(ComparisonSummary::from_rows(&rows), ComparisonSummary::default());
}

#[test]
fn selection_toggles_and_suppresses_duplicates() {
    let mut selection = selection(&["bid-a", "bid-a", "bid-b"]);
    assert_eq!(selection.len(), 2);

    assert!(!selection.toggle(BidId("bid-a".to_string())));
    assert!(selection.toggle(BidId("bid-c".to_string())));
    assert_eq!(
        selection.ids(),
        &[BidId("bid-b".to_string()), BidId("bid-c".to_string())]
    );

    selection.clear();
    assert!(selection.is_empty());
}

#[test]
fn summary_names_standout_bids() {
    let rows = compare(
        &sample_bids(),
        &selection(&["bid-a", "bid-b", "bid-c"]),
        &ScoringEngine::default(),
    );
    let summary = ComparisonSummary::from_rows(&rows);

    assert_eq!(summary.lowest_price, Some(BidId("bid-b".to_string())));
    assert_eq!(summary.fastest_delivery, Some(BidId("bid-c".to_string())));
    assert!(summary.best_score.is_some());
}
