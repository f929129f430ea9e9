//! Table controller.
//!
//! [`TableController`] owns the table state and mediates between UI events
//! and a [`QueryEngine`]. Every state-changing call updates the state at
//! once, then leaves a request in a single-slot mailbox. A background worker
//! sends the request to the engine after the debounce window passes without
//! another change, so a burst of calls costs one query carrying the final
//! state.
//!
//! Renderers observe the table through [`TableController::subscribe`], which
//! yields a [`TableSnapshot`] after every change.
//!
//! # Example
//!
//! ```
//! use datagrid_lib::controller::{ControllerConfig, TableController};
//! use datagrid_lib::engine::{EngineConfig, InMemoryEngine};
//! use datagrid_lib::model::Record;
//! use datagrid_lib::query::Direction;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let engine = InMemoryEngine::new(vec![
//!     Record::new(1, "Ada", "Lovelace").with_age(36),
//!     Record::new(2, "Alan", "Turing").with_age(41),
//! ])
//! .with_config(EngineConfig::instant());
//!
//! let controller = TableController::new(engine, ControllerConfig::default());
//! controller.submit_filter("lastName", Some("Turing"), Some(Direction::Desc));
//!
//! let snapshot = controller.settled().await;
//! assert_eq!(snapshot.total_count(), 1);
//! # }
//! ```

mod config;
mod selection;
mod state;
mod worker;

pub use config::*;
pub use selection::*;
pub use state::*;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use log::debug;
use log::info;
use log::warn;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::engine::QueryEngine;
use crate::error::QueryError;
use crate::model::Record;
use crate::model::RecordId;
use crate::query::DEFAULT_PAGE_SIZE;
use crate::query::Direction;
use crate::query::PageRequest;
use crate::query::Query;
use crate::query::QueryResult;
use crate::query::SortSpec;

/// State shared between the controller handle and its worker.
pub(crate) struct Shared {
    state: Mutex<Inner>,
    snapshots: watch::Sender<TableSnapshot>,
    /// Latest request not yet picked up by the worker.
    requests: watch::Sender<Option<Query>>,
    config: ControllerConfig,
}

struct Inner {
    table: TableSnapshot,
    in_flight: Option<CancellationToken>,
}

impl Shared {
    fn new(config: ControllerConfig) -> (Self, watch::Receiver<Option<Query>>) {
        let table = TableSnapshot::new(config.page_size);
        let (snapshots, _) = watch::channel(table.clone());
        let (requests, receiver) = watch::channel(None);
        let shared = Self {
            state: Mutex::new(Inner {
                table,
                in_flight: None,
            }),
            snapshots,
            requests,
            config,
        };
        (shared, receiver)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &Inner) {
        self.snapshots.send_replace(inner.table.clone());
    }

    /// Hands the current state to the worker as the next request.
    fn schedule(&self, inner: &mut Inner) {
        inner.table.pending = true;
        if let Some(token) = inner.in_flight.as_ref().filter(|_| self.config.cancel_superseded) {
            debug!("Cancelling superseded query");
            token.cancel();
        }
        let query = inner.table.query();
        debug!(
            "Scheduled query: {} filter(s), sort {:?}, page {} (size {})",
            query.filters.len(),
            query.sort,
            query.page.page_index(),
            query.page.page_size()
        );
        self.requests.send_replace(Some(query));
        self.publish(inner);
    }

    /// Takes the pending request and marks it in flight.
    ///
    /// Reads the slot under the state lock so a concurrent change either
    /// lands in this request or stays pending for the next one.
    fn begin(
        &self,
        requests: &mut watch::Receiver<Option<Query>>,
        token: &CancellationToken,
    ) -> Option<Query> {
        let mut inner = self.lock();
        let query = requests.borrow_and_update().clone()?;
        inner.table.pending = false;
        inner.table.loading = true;
        inner.in_flight = Some(token.clone());
        self.publish(&inner);
        Some(query)
    }

    /// Applies the outcome of the query `token` belongs to.
    ///
    /// `schedule` cancels under the same lock, so checking the token here
    /// decides atomically whether this result is still wanted.
    fn finish(&self, token: &CancellationToken, outcome: Result<QueryResult, QueryError>) {
        let mut inner = self.lock();
        if token.is_cancelled() {
            self.discard_locked(&mut inner);
            return;
        }

        inner.in_flight = None;
        inner.table.loading = false;
        match outcome {
            Ok(result) => {
                info!(
                    "Loaded {} row(s), {} matching, page {} of {}",
                    result.len(),
                    result.total_count(),
                    inner.table.page_index + 1,
                    result.page_count()
                );
                inner.table.result = result;
                inner.table.error = None;
                inner.table.selection.clear();
            }
            Err(error) => {
                warn!("Query failed, keeping last result: {}", error);
                inner.table.error = Some(error);
            }
        }
        self.publish(&inner);
    }

    /// Drops the in-flight query without applying its result.
    fn discard(&self) {
        let mut inner = self.lock();
        self.discard_locked(&mut inner);
    }

    fn discard_locked(&self, inner: &mut Inner) {
        debug!("Discarding superseded query result");
        inner.in_flight = None;
        inner.table.loading = false;
        self.publish(inner);
    }
}

/// Owns table state and drives a [`QueryEngine`] with debounced requests.
///
/// Dropping the controller stops its worker; a query in flight at that
/// moment is abandoned.
pub struct TableController {
    shared: Arc<Shared>,
    shutdown: CancellationToken,
}

impl TableController {
    /// Creates a controller and schedules the initial query.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime, since the query worker
    /// is spawned onto it.
    pub fn new(engine: impl QueryEngine + 'static, config: ControllerConfig) -> Self {
        Self::with_engine(Arc::new(engine), config)
    }

    /// Like [`new`](Self::new), for an engine that is already shared.
    pub fn with_engine(engine: Arc<dyn QueryEngine>, mut config: ControllerConfig) -> Self {
        if let Err(error) = PageRequest::first(config.page_size) {
            warn!("{}; using {}", error, DEFAULT_PAGE_SIZE);
            config.page_size = DEFAULT_PAGE_SIZE;
        }

        let (shared, receiver) = Shared::new(config);
        let shared = Arc::new(shared);

        let shutdown = CancellationToken::new();
        tokio::spawn(worker::run(
            shared.clone(),
            engine,
            receiver,
            shutdown.clone(),
        ));

        let controller = Self { shared, shutdown };
        controller.update(|_| true);
        controller
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.shared.config
    }

    // -------------------------------------------------------------------------
    // Observation
    // -------------------------------------------------------------------------

    /// Returns the current state.
    pub fn snapshot(&self) -> TableSnapshot {
        self.shared.snapshots.borrow().clone()
    }

    /// Subscribes to state changes.
    ///
    /// The receiver always holds the latest snapshot; intermediate ones may
    /// be skipped by a slow reader.
    pub fn subscribe(&self) -> watch::Receiver<TableSnapshot> {
        self.shared.snapshots.subscribe()
    }

    /// Waits until no request is pending or in flight and returns that state.
    pub async fn settled(&self) -> TableSnapshot {
        let mut receiver = self.subscribe();
        match receiver.wait_for(TableSnapshot::is_settled).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        }
    }

    // -------------------------------------------------------------------------
    // Filtering and sorting
    // -------------------------------------------------------------------------

    /// Applies a column's filter popover.
    ///
    /// Sets the filter value (`None` or empty clears it). `Some(direction)`
    /// makes this column the sort key; `None` clears the sort if this column
    /// held it. Always returns to the first page.
    ///
    /// Returns `true` if the state changed and a query was scheduled.
    pub fn submit_filter(
        &self,
        column_id: &str,
        value: Option<&str>,
        sort: Option<Direction>,
    ) -> bool {
        self.update(|table| {
            let mut changed = table.filters.set(column_id, value);
            changed |= match sort {
                Some(direction) => {
                    replace_sort(&mut table.sort, Some(SortSpec::new(column_id, direction)))
                }
                None if table.sort.as_ref().is_some_and(|s| s.id == column_id) => {
                    replace_sort(&mut table.sort, None)
                }
                None => false,
            };
            changed |= reset_page(table);
            changed
        })
    }

    /// Makes `sort` the only sort key and returns to the first page.
    pub fn set_sort(&self, sort: SortSpec) -> bool {
        self.update(|table| replace_sort(&mut table.sort, Some(sort)) | reset_page(table))
    }

    /// Removes the sort key and returns to the first page.
    pub fn clear_sort(&self) -> bool {
        self.update(|table| replace_sort(&mut table.sort, None) | reset_page(table))
    }

    /// Advances a column's sort through unsorted, ascending, descending and
    /// back, like clicking its header. Returns the new direction.
    ///
    /// Cycling a column other than the current sort key starts it at
    /// ascending.
    pub fn cycle_sort(&self, column_id: &str) -> Option<Direction> {
        let mut next = None;
        self.update(|table| {
            let current = table
                .sort
                .as_ref()
                .filter(|sort| sort.id == column_id)
                .map(SortSpec::direction);
            next = Direction::cycle(current);
            let sort = next.map(|direction| SortSpec::new(column_id, direction));
            replace_sort(&mut table.sort, sort) | reset_page(table)
        });
        next
    }

    /// Sends the current state again, e.g. after a failed query.
    ///
    /// A no-op returning `false` while a request is already pending or
    /// loading.
    pub fn refresh(&self) -> bool {
        self.update(|table| table.is_settled())
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Moves to a page within `[0, page_count - 1]`.
    ///
    /// Out-of-range targets, the current page, and any call while a request
    /// is pending or loading are no-ops returning `false`. The page range
    /// comes from the last result, which only matches the current filters,
    /// sort and page size once the table is settled.
    pub fn go_to_page(&self, page_index: usize) -> bool {
        self.navigate(|_| Some(page_index))
    }

    pub fn next_page(&self) -> bool {
        self.navigate(|table| table.page_index.checked_add(1))
    }

    pub fn previous_page(&self) -> bool {
        self.navigate(|table| table.page_index.checked_sub(1))
    }

    pub fn first_page(&self) -> bool {
        self.navigate(|_| Some(0))
    }

    pub fn last_page(&self) -> bool {
        self.navigate(|table| table.page_count().checked_sub(1))
    }

    /// Changes the page size and returns to the first page.
    ///
    /// A size outside [`PAGE_SIZES`](crate::query::PAGE_SIZES) leaves the
    /// size unchanged, records the error in the state and returns it.
    pub fn change_page_size(&self, page_size: usize) -> Result<bool, QueryError> {
        if let Err(error) = PageRequest::first(page_size) {
            warn!("Rejected page size change: {}", error);
            let mut inner = self.shared.lock();
            inner.table.error = Some(error.clone());
            self.shared.publish(&inner);
            return Err(error);
        }

        Ok(self.update(|table| {
            let changed = table.page_size != page_size;
            table.page_size = page_size;
            changed | reset_page(table)
        }))
    }

    /// Clears filters and sort and returns to the first page at the
    /// configured page size.
    pub fn reset(&self) -> bool {
        let page_size = self.shared.config.page_size;
        self.update(|table| {
            let mut changed = table.filters.clear();
            changed |= replace_sort(&mut table.sort, None);
            changed |= table.page_size != page_size;
            table.page_size = page_size;
            changed | reset_page(table)
        })
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Replaces the selection with the given rows of the current page.
    pub fn select_rows(&self, ids: impl IntoIterator<Item = RecordId>) -> bool {
        self.update_selection(|selection, page| selection.replace(page, ids))
    }

    /// Toggles one row of the current page.
    pub fn toggle_row(&self, id: RecordId) -> bool {
        self.update_selection(|selection, page| selection.toggle(page, id))
    }

    /// Selects all rows of the current page, or none if all already are.
    pub fn toggle_all_page_rows(&self) -> bool {
        self.update_selection(Selection::toggle_all)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Applies `change`; if it reports a change, schedules a query.
    fn update(&self, change: impl FnOnce(&mut TableSnapshot) -> bool) -> bool {
        let mut inner = self.shared.lock();
        if !change(&mut inner.table) {
            return false;
        }
        self.shared.schedule(&mut inner);
        true
    }

    fn navigate(&self, target: impl FnOnce(&TableSnapshot) -> Option<usize>) -> bool {
        self.update(|table| {
            if !table.is_settled() {
                return false;
            }
            match target(table) {
                Some(index) if index != table.page_index && index < table.page_count() => {
                    table.page_index = index;
                    true
                }
                _ => false,
            }
        })
    }

    /// Applies a selection change; selection never triggers a query.
    fn update_selection(&self, change: impl FnOnce(&mut Selection, &[Record]) -> bool) -> bool {
        let mut inner = self.shared.lock();
        let TableSnapshot {
            selection, result, ..
        } = &mut inner.table;
        if !change(selection, result.records()) {
            return false;
        }
        self.shared.publish(&inner);
        true
    }
}

impl Drop for TableController {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn replace_sort(slot: &mut Option<SortSpec>, sort: Option<SortSpec>) -> bool {
    if *slot == sort {
        return false;
    }
    *slot = sort;
    true
}

fn reset_page(table: &mut TableSnapshot) -> bool {
    let changed = table.page_index != 0;
    table.page_index = 0;
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_of(total_count: usize) -> QueryResult {
        let records = (1..=total_count as u64)
            .map(|id| Record::new(id, "Ada", "Lovelace"))
            .collect();
        QueryResult::new(records, total_count, DEFAULT_PAGE_SIZE)
    }

    fn in_flight(shared: &Shared, requests: &mut watch::Receiver<Option<Query>>) -> CancellationToken {
        shared.schedule(&mut shared.lock());
        let token = CancellationToken::new();
        assert!(shared.begin(requests, &token).is_some());
        token
    }

    #[test]
    fn test_finish_applies_live_result() {
        let (shared, mut requests) = Shared::new(ControllerConfig::default());
        let token = in_flight(&shared, &mut requests);

        shared.finish(&token, Ok(result_of(3)));

        let table = shared.snapshots.borrow().clone();
        assert!(!table.loading);
        assert_eq!(table.total_count(), 3);
    }

    #[test]
    fn test_finish_discards_superseded_result() {
        let (shared, mut requests) = Shared::new(ControllerConfig::default());
        let token = in_flight(&shared, &mut requests);

        // A newer request supersedes the in-flight one before it completes.
        shared.schedule(&mut shared.lock());
        assert!(token.is_cancelled());
        shared.finish(&token, Ok(result_of(3)));

        let inner = shared.lock();
        assert!(inner.in_flight.is_none());
        assert!(!inner.table.loading);
        assert!(inner.table.pending);
        assert_eq!(inner.table.total_count(), 0);
    }
}
