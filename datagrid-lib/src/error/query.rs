//! Query error types

use std::time::Duration;

use crate::query::PAGE_SIZES;

/// Errors that can occur while requesting a page of results.
///
/// The in-memory engine never produces `Timeout` or `Failed` on its own; they
/// exist for engines backed by something slower or less reliable, and for the
/// controller's query timeout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The requested page size is not one of the allowed sizes.
    #[error("Invalid page size {page_size}, expected one of {:?}", PAGE_SIZES)]
    InvalidPageRequest {
        /// The rejected page size.
        page_size: usize,
    },

    /// The query did not complete within the configured limit.
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),

    /// The backend failed to answer the query.
    #[error("Query failed: {0}")]
    Failed(String),
}

impl QueryError {
    /// Creates a new backend failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Returns `true` if issuing the same query again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Failed(_))
    }
}
