use super::domain::{SearchCandidate, SearchFilters, SearchResult};
use super::relevance::relevance;
use super::sort::SearchSort;

/// Filter, score, and order candidates entirely in memory.
///
/// Predicates are re-applied even when the backend already filtered, so the result
/// set honors the filter semantics regardless of how the remote query was executed.
pub fn search_candidates(
    candidates: Vec<SearchCandidate>,
    filters: &SearchFilters,
    sort: SearchSort,
) -> Vec<SearchResult> {
    let predicates = filters.predicates();

    let mut results: Vec<SearchResult> = candidates
        .into_iter()
        .filter(|candidate| predicates.iter().all(|predicate| predicate.matches(candidate)))
        .map(|candidate| {
            let score = relevance(&filters.query, &candidate);
            SearchResult::from_candidate(candidate, score)
        })
        .collect();

    sort.apply(&mut results);
    results
}
