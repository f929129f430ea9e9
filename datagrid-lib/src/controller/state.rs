//! Table state published to the presentation layer.

use super::Selection;
use crate::error::QueryError;
use crate::model::Record;
use crate::query::Filters;
use crate::query::PageRequest;
use crate::query::Query;
use crate::query::QueryResult;
use crate::query::SortSpec;

/// Coarse state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No query in flight; the page reflects the last completed request.
    Idle,
    /// A query is in flight.
    Loading,
    /// The last request failed; the page is the last good result.
    Error,
}

/// Everything a renderer needs to draw the table.
///
/// `page_index` and `page_size` describe the *requested* page, which may run
/// ahead of `result` while a request is pending or loading.
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    pub filters: Filters,
    pub sort: Option<SortSpec>,
    pub page_index: usize,
    pub page_size: usize,
    /// A query is in flight.
    pub loading: bool,
    /// A state change is waiting out the debounce window.
    pub pending: bool,
    /// Error of the last request, cleared by the next successful one.
    pub error: Option<QueryError>,
    /// Last good result.
    pub result: QueryResult,
    pub selection: Selection,
}

impl TableSnapshot {
    pub(crate) fn new(page_size: usize) -> Self {
        Self {
            filters: Filters::new(),
            sort: None,
            page_index: 0,
            page_size,
            loading: false,
            pending: false,
            error: None,
            result: QueryResult::default(),
            selection: Selection::default(),
        }
    }

    pub fn status(&self) -> Status {
        if self.loading {
            Status::Loading
        } else if self.error.is_some() {
            Status::Error
        } else {
            Status::Idle
        }
    }

    /// Returns `true` once nothing is pending or in flight.
    pub fn is_settled(&self) -> bool {
        !self.pending && !self.loading
    }

    /// Rows of the current page.
    pub fn page(&self) -> &[Record] {
        self.result.records()
    }

    pub fn total_count(&self) -> usize {
        self.result.total_count()
    }

    pub fn page_count(&self) -> usize {
        self.result.page_count()
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    /// Selected rows in page order.
    pub fn selected_rows(&self) -> Vec<&Record> {
        self.page()
            .iter()
            .filter(|record| self.selection.contains(record.id()))
            .collect()
    }

    /// The request this state describes.
    pub fn query(&self) -> Query {
        Query {
            filters: self.filters.clone(),
            sort: self.sort.clone(),
            page: PageRequest::unchecked(self.page_index, self.page_size),
        }
    }
}
