//! Page requests and results.

use serde::Serialize;

use crate::error::QueryError;
use crate::model::Record;

/// Page sizes a table may show.
pub const PAGE_SIZES: [usize; 5] = [10, 20, 30, 40, 50];

/// Page size of a fresh or reset table.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `total_count` rows: `ceil(total / page_size)`.
///
/// Zero rows give zero pages.
pub fn page_count(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// Which page of results to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    page_index: usize,
    page_size: usize,
}

impl PageRequest {
    /// Creates a page request, rejecting page sizes outside [`PAGE_SIZES`].
    pub fn new(page_index: usize, page_size: usize) -> Result<Self, QueryError> {
        if !PAGE_SIZES.contains(&page_size) {
            return Err(QueryError::InvalidPageRequest { page_size });
        }
        Ok(Self {
            page_index,
            page_size,
        })
    }

    /// Creates a request from a page size that was validated earlier.
    pub(crate) fn unchecked(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// Creates a request for the first page.
    pub fn first(page_size: usize) -> Result<Self, QueryError> {
        Self::new(0, page_size)
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Index of the first row of this page in the full result.
    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of query results with the size of the full match set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    records: Vec<Record>,
    total_count: usize,
    page_count: usize,
}

impl QueryResult {
    /// Creates a result, deriving the page count from `page_size`.
    pub fn new(records: Vec<Record>, total_count: usize, page_size: usize) -> Self {
        Self {
            records,
            total_count,
            page_count: page_count(total_count, page_size),
        }
    }

    /// Returns the records on this page.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the number of rows matching the query before paging.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records on this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(1, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(25, 10), 3);
        assert_eq!(page_count(100_000, 30), 3334);
    }

    #[test]
    fn test_rejects_unlisted_page_sizes() {
        assert_eq!(
            PageRequest::new(0, 15),
            Err(QueryError::InvalidPageRequest { page_size: 15 })
        );
        assert!(PageRequest::new(0, 0).is_err());
        for size in PAGE_SIZES {
            assert!(PageRequest::first(size).is_ok());
        }
    }

    #[test]
    fn test_offset() {
        let request = PageRequest::new(3, 20).unwrap();
        assert_eq!(request.offset(), 60);
        assert_eq!(PageRequest::first(20).unwrap().offset(), 0);
        assert_eq!(PageRequest::default().page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_result_page_count() {
        let result = QueryResult::new(Vec::new(), 25, 10);
        assert_eq!(result.page_count(), 3);
        assert_eq!(QueryResult::default().page_count(), 0);
    }
}
