use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::catalog::{CatalogError, CatalogSource};
use super::domain::{SearchFilters, SearchPage};
use super::filters::{CatalogQuery, FilterError};
use super::pagination::Pagination;
use super::pipeline::search_candidates;
use super::sort::SearchSort;
use crate::config::SearchConfig;

/// Observable engine state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchState {
    #[default]
    Idle,
    Loading {
        request: u64,
    },
    Ready(SearchPage),
    Failed {
        request: u64,
        message: String,
    },
}

impl SearchState {
    pub fn label(&self) -> &'static str {
        match self {
            SearchState::Idle => "idle",
            SearchState::Loading { .. } => "loading",
            SearchState::Ready(_) => "ready",
            SearchState::Failed { .. } => "failed",
        }
    }

    /// Visible results; empty unless ready.
    pub fn page(&self) -> Option<&SearchPage> {
        match self {
            SearchState::Ready(page) => Some(page),
            _ => None,
        }
    }

    pub fn total_count(&self) -> usize {
        self.page().map(|page| page.total_count).unwrap_or(0)
    }
}

/// What happened to one `search` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Ready(SearchPage),
    Failed(CatalogError),
    /// A newer search (or a clear) started before this one resolved; nothing was committed.
    Superseded { request: u64 },
}

/// Search engine holding the visible result state for one search surface.
///
/// Only the most recently started request may commit: every call takes a sequence
/// number and the commit re-checks it under the state lock.
pub struct SearchEngine<S> {
    source: Arc<S>,
    config: SearchConfig,
    sequence: AtomicU64,
    state: Mutex<SearchState>,
}

impl<S> SearchEngine<S>
where
    S: CatalogSource + 'static,
{
    pub fn new(source: Arc<S>, config: SearchConfig) -> Self {
        Self {
            source,
            config,
            sequence: AtomicU64::new(0),
            state: Mutex::new(SearchState::Idle),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Build a page window using the configured page-size cap.
    pub fn pagination(
        &self,
        page: usize,
        page_size: Option<usize>,
    ) -> Result<Pagination, FilterError> {
        Pagination::new(
            page,
            page_size.unwrap_or(self.config.default_page_size),
            self.config.max_page_size,
        )
    }

    pub fn state(&self) -> SearchState {
        self.lock_state().clone()
    }

    pub async fn search(
        &self,
        filters: &SearchFilters,
        pagination: Pagination,
        sort: SearchSort,
    ) -> SearchOutcome {
        let request = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.commit(request, SearchState::Loading { request });

        debug!(request, page = pagination.page(), "search started");
        let fetched = self.fetch_page(filters, pagination, sort).await;

        match fetched {
            Ok(page) => {
                if self.commit(request, SearchState::Ready(page.clone())) {
                    info!(
                        request,
                        total = page.total_count,
                        returned = page.results.len(),
                        "search results ready"
                    );
                    SearchOutcome::Ready(page)
                } else {
                    self.superseded(request)
                }
            }
            Err(error) => {
                let failed = SearchState::Failed {
                    request,
                    message: error.to_string(),
                };
                if self.commit(request, failed) {
                    warn!(request, %error, "search failed");
                    SearchOutcome::Failed(error)
                } else {
                    self.superseded(request)
                }
            }
        }
    }

    /// Run the same query and ranking as [`search`](Self::search) without touching the
    /// visible state or the request sequence.
    pub async fn preview(
        &self,
        filters: &SearchFilters,
        pagination: Pagination,
        sort: SearchSort,
    ) -> Result<SearchPage, CatalogError> {
        self.fetch_page(filters, pagination, sort).await
    }

    /// Return to idle with no results and invalidate any request still in flight.
    pub fn clear_results(&self) {
        let mut state = self.lock_state();
        self.sequence.fetch_add(1, Ordering::SeqCst);
        *state = SearchState::Idle;
    }

    async fn fetch_page(
        &self,
        filters: &SearchFilters,
        pagination: Pagination,
        sort: SearchSort,
    ) -> Result<SearchPage, CatalogError> {
        // The window always reaches the requested page, even past the configured limit.
        let limit = self.config.candidate_limit.max(pagination.end());
        let query = CatalogQuery::from_filters(filters, limit);
        debug!(
            predicates = query.predicates.len(),
            limit,
            "issuing catalog query"
        );
        let batch = self.source.query(&query).await?;

        let returned = batch.candidates.len();
        let reported = batch.total_count;
        let ranked = search_candidates(batch.candidates, filters, sort);

        let total_count = if reported > returned {
            let dropped = returned - ranked.len();
            warn!(
                returned,
                total = reported,
                "catalog truncated candidates; ranking covers the returned window"
            );
            reported.saturating_sub(dropped).max(ranked.len())
        } else {
            ranked.len()
        };

        Ok(pagination.paginate_with_total(ranked, total_count))
    }

    fn commit(&self, request: u64, next: SearchState) -> bool {
        let mut state = self.lock_state();
        if self.sequence.load(Ordering::SeqCst) != request {
            return false;
        }
        *state = next;
        true
    }

    fn superseded(&self, request: u64) -> SearchOutcome {
        debug!(request, "discarding stale search response");
        SearchOutcome::Superseded { request }
    }

    fn lock_state(&self) -> MutexGuard<'_, SearchState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
