use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{BudgetRange, SearchCandidate, SearchFilters};

/// Categorical attributes that accept an exact-match constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Category,
    Location,
    Urgency,
    EntityType,
}

impl FilterField {
    fn value<'a>(&self, candidate: &'a SearchCandidate) -> Option<&'a str> {
        match self {
            FilterField::Category => candidate.category.as_deref(),
            FilterField::Location => candidate.location.as_deref(),
            FilterField::Urgency => candidate.urgency.as_deref(),
            FilterField::EntityType => Some(candidate.entity_type.as_str()),
        }
    }
}

/// Backend-agnostic description of one constraint the catalog must honor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Lower-cased free-text query.
    Text { query: String },
    Equals { field: FilterField, value: String },
    Budget { range: BudgetRange },
    MinRating { threshold: f64 },
    Available,
    /// Passes when the candidate carries at least one of the tags.
    AnyTag { tags: BTreeSet<String> },
}

impl Predicate {
    pub fn matches(&self, candidate: &SearchCandidate) -> bool {
        match self {
            Predicate::Text { query } => text_matches(query, candidate),
            Predicate::Equals { field, value } => field
                .value(candidate)
                .map(|actual| actual.trim().to_lowercase() == value.trim().to_lowercase())
                .unwrap_or(false),
            Predicate::Budget { range } => candidate
                .price
                .map(|price| range.contains(price))
                .unwrap_or(true),
            Predicate::MinRating { threshold } => candidate.rating.unwrap_or(0.0) >= *threshold,
            Predicate::Available => candidate.available,
            Predicate::AnyTag { tags } => candidate
                .tags
                .iter()
                .any(|tag| tags.contains(&tag.trim().to_lowercase())),
        }
    }
}

/// Remote query handed to a [`CatalogSource`](super::catalog::CatalogSource).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub predicates: Vec<Predicate>,
    /// Upper bound on candidates the backend should return.
    pub limit: usize,
}

impl CatalogQuery {
    pub fn from_filters(filters: &SearchFilters, limit: usize) -> Self {
        Self {
            predicates: filters.predicates(),
            limit,
        }
    }

    pub fn matches(&self, candidate: &SearchCandidate) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate.matches(candidate))
    }
}

/// Malformed search input, rejected before the engine runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("budget bounds must be finite numbers")]
    NonFiniteBudget,
    #[error("budget bounds must not be negative")]
    NegativeBudget,
    #[error("budget minimum {min} exceeds maximum {max}")]
    InvertedBudget { min: f64, max: f64 },
    #[error("minimum rating must be a non-negative number")]
    InvalidRating,
    #[error("page numbers start at 1")]
    InvalidPage,
    #[error("page size must be between 1 and {max}, got {requested}")]
    InvalidPageSize { requested: usize, max: usize },
}

impl SearchFilters {
    pub fn validate(&self) -> Result<(), FilterError> {
        let BudgetRange { min, max } = self.budget_range;
        if !min.is_finite() || max.map(|max| !max.is_finite()).unwrap_or(false) {
            return Err(FilterError::NonFiniteBudget);
        }
        if min < 0.0 || max.map(|max| max < 0.0).unwrap_or(false) {
            return Err(FilterError::NegativeBudget);
        }
        if let Some(max) = max {
            if min > max {
                return Err(FilterError::InvertedBudget { min, max });
            }
        }
        if !self.rating.is_finite() || self.rating < 0.0 {
            return Err(FilterError::InvalidRating);
        }
        Ok(())
    }

    /// Translate the active constraints into predicates; defaults contribute none.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        let query = self.query.trim();
        if !query.is_empty() {
            predicates.push(Predicate::Text {
                query: query.to_lowercase(),
            });
        }

        let categorical = [
            (FilterField::Category, &self.category),
            (FilterField::Location, &self.location),
            (FilterField::Urgency, &self.urgency),
            (FilterField::EntityType, &self.entity_type),
        ];
        for (field, value) in categorical {
            if let Some(value) = constraint(value) {
                predicates.push(Predicate::Equals {
                    field,
                    value: value.to_string(),
                });
            }
        }

        if !self.budget_range.is_unbounded() {
            predicates.push(Predicate::Budget {
                range: self.budget_range,
            });
        }
        if self.rating > 0.0 {
            predicates.push(Predicate::MinRating {
                threshold: self.rating,
            });
        }
        if self.availability {
            predicates.push(Predicate::Available);
        }
        if !self.tags.is_empty() {
            predicates.push(Predicate::AnyTag {
                tags: self.tags.clone(),
            });
        }

        predicates
    }

    pub fn matches(&self, candidate: &SearchCandidate) -> bool {
        self.predicates()
            .iter()
            .all(|predicate| predicate.matches(candidate))
    }

    /// Number of constraints currently narrowing the result set.
    pub fn active_filter_count(&self) -> usize {
        self.predicates().len()
    }

    pub fn is_default(&self) -> bool {
        self.active_filter_count() == 0
    }
}

fn constraint(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case("all"))
}

/// Whole-query substring in any field, or every token found in some field.
fn text_matches(query: &str, candidate: &SearchCandidate) -> bool {
    let fields = searchable_fields(candidate);
    if fields.iter().any(|field| field.contains(query)) {
        return true;
    }

    let mut tokens = query.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return true;
    }
    tokens.all(|token| fields.iter().any(|field| field.contains(token)))
}

pub(crate) fn searchable_fields(candidate: &SearchCandidate) -> Vec<String> {
    let mut fields = Vec::with_capacity(candidate.tags.len() + 2);
    fields.push(candidate.title.to_lowercase());
    fields.push(candidate.description.to_lowercase());
    fields.extend(candidate.tags.iter().map(|tag| tag.to_lowercase()));
    fields
}
