//! Controller configuration

use std::time::Duration;

use crate::error::QueryError;
use crate::query::DEFAULT_PAGE_SIZE;
use crate::query::PageRequest;

/// Configuration for a [`TableController`](super::TableController).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use datagrid_lib::controller::ControllerConfig;
///
/// let config = ControllerConfig::default()
///     .with_debounce(Duration::from_millis(250))
///     .with_query_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Quiet period a state change must survive before a query is sent.
    ///
    /// Default: 100 milliseconds
    pub debounce: Duration,

    /// Page size of a fresh table, and the size `reset()` returns to.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Upper bound on a single query. `None` waits indefinitely.
    ///
    /// Default: none
    pub query_timeout: Option<Duration>,

    /// Whether a newer request cancels the one in flight.
    ///
    /// Default: true
    pub cancel_superseded: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(100),
            page_size: DEFAULT_PAGE_SIZE,
            query_timeout: None,
            cancel_superseded: true,
        }
    }
}

impl ControllerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Sets the initial page size, rejecting sizes a table cannot show.
    pub fn with_page_size(mut self, page_size: usize) -> Result<Self, QueryError> {
        PageRequest::first(page_size)?;
        self.page_size = page_size;
        Ok(self)
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    pub fn with_cancel_superseded(mut self, enabled: bool) -> Self {
        self.cancel_superseded = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_is_validated() {
        assert_eq!(ControllerConfig::new().with_page_size(30).unwrap().page_size, 30);
        assert_eq!(
            ControllerConfig::new().with_page_size(25).unwrap_err(),
            QueryError::InvalidPageRequest { page_size: 25 }
        );
    }
}
