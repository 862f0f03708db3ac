use serde::{Deserialize, Serialize};

use super::domain::{SearchPage, SearchResult};
use super::filters::FilterError;

/// Validated 1-indexed page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Pagination {
    pub fn new(page: usize, page_size: usize, max_page_size: usize) -> Result<Self, FilterError> {
        if page == 0 {
            return Err(FilterError::InvalidPage);
        }
        if page_size == 0 || page_size > max_page_size {
            return Err(FilterError::InvalidPageSize {
                requested: page_size,
                max: max_page_size,
            });
        }
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn total_pages(&self, total_count: usize) -> usize {
        total_count.div_ceil(self.page_size)
    }

    /// Exclusive end of the window, i.e. how many ranked rows this page needs.
    pub fn end(&self) -> usize {
        self.offset().saturating_add(self.page_size)
    }

    /// Cut `[(page-1)*size, page*size)` out of the full ranking.
    ///
    /// Pages past the end are empty; `total_count` always reports the full set.
    pub fn paginate(&self, ranked: Vec<SearchResult>) -> SearchPage {
        let total_count = ranked.len();
        self.paginate_with_total(ranked, total_count)
    }

    /// Like [`paginate`](Self::paginate) when `ranked` is only a prefix of a larger
    /// result set whose size is known to be `total_count`.
    pub fn paginate_with_total(
        &self,
        ranked: Vec<SearchResult>,
        total_count: usize,
    ) -> SearchPage {
        let total_count = total_count.max(ranked.len());
        let results = ranked
            .into_iter()
            .skip(self.offset())
            .take(self.page_size)
            .collect();

        SearchPage {
            results,
            total_count,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages(total_count),
        }
    }
}
