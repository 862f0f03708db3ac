use super::domain::SearchCandidate;

const TITLE_WEIGHT: f64 = 60.0;
const DESCRIPTION_WEIGHT: f64 = 25.0;
const TAG_WEIGHT: f64 = 15.0;

/// Relevance in `0..=100` for a candidate that already passed the filters.
///
/// A finite backend-supplied value wins. Otherwise each query token earns its share
/// of the title, description, and tag weights for every field it appears in, so a
/// query hitting all three fields everywhere scores 100. An empty query ranks every
/// candidate equally at 100.
pub fn relevance(query: &str, candidate: &SearchCandidate) -> f64 {
    if let Some(score) = candidate.relevance.filter(|score| score.is_finite()) {
        return score.clamp(0.0, 100.0);
    }

    let query = query.trim().to_lowercase();
    let tokens: Vec<&str> = query.split_whitespace().collect();
    if tokens.is_empty() {
        return 100.0;
    }

    let title = candidate.title.to_lowercase();
    let description = candidate.description.to_lowercase();
    let tags: Vec<String> = candidate.tags.iter().map(|tag| tag.to_lowercase()).collect();

    let share = 1.0 / tokens.len() as f64;
    let score: f64 = tokens
        .iter()
        .map(|token| {
            let mut earned = 0.0;
            if title.contains(token) {
                earned += TITLE_WEIGHT;
            }
            if description.contains(token) {
                earned += DESCRIPTION_WEIGHT;
            }
            if tags.iter().any(|tag| tag.contains(token)) {
                earned += TAG_WEIGHT;
            }
            earned * share
        })
        .sum();

    score.round().clamp(0.0, 100.0)
}
