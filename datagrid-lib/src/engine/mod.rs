//! Query engines.
//!
//! [`execute`] is the whole filter → sort → paginate pipeline over a slice of
//! records. The [`QueryEngine`] trait is the async seam the controller talks
//! to, so an in-memory dataset and a remote backend are interchangeable.

mod config;
mod matcher;
mod memory;

pub use config::*;
pub use memory::*;

use async_trait::async_trait;

use crate::error::QueryError;
use crate::model::Record;
use crate::query::FilterMode;
use crate::query::Query;
use crate::query::QueryResult;

use matcher::RecordFilter;

/// Answers table queries.
///
/// Implementations must be stateless with respect to queries: the controller
/// may call `execute` again before a previous future has been dropped.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Returns the requested page and the total number of matching rows.
    async fn execute(&self, query: &Query) -> Result<QueryResult, QueryError>;
}

/// Runs a query over `dataset`.
///
/// - Filters on filterable columns are conjunctive; others are ignored.
/// - Sorting is stable in both directions, so rows with equal keys keep
///   their filtered order.
/// - A page starting past the last row is empty.
///
/// # Example
///
/// ```
/// use datagrid_lib::engine::execute;
/// use datagrid_lib::model::Record;
/// use datagrid_lib::query::{Filter, FilterMode, Query};
///
/// let dataset = vec![
///     Record::new(1, "A", "x").with_age(1),
///     Record::new(2, "B", "x").with_age(2),
///     Record::new(3, "A", "x").with_age(3),
/// ];
///
/// let result = execute(&dataset, &Query::new().filter(Filter::eq("firstName", "A")), FilterMode::Exact);
/// assert_eq!(result.total_count(), 2);
/// ```
pub fn execute(dataset: &[Record], query: &Query, mode: FilterMode) -> QueryResult {
    let mut filter = RecordFilter::new(&query.filters, mode);

    let mut rows: Vec<&Record> = if filter.is_empty() {
        dataset.iter().collect()
    } else {
        dataset.iter().filter(|record| filter.matches(record)).collect()
    };

    if let Some((column, desc)) = query.sort.as_ref().and_then(|sort| Some((sort.column()?, sort.desc))) {
        rows.sort_by(|a, b| {
            let ordering = a.cmp_by(b, column);
            if desc { ordering.reverse() } else { ordering }
        });
    }

    let total_count = rows.len();
    let page = query.page;
    let records = rows
        .into_iter()
        .skip(page.offset())
        .take(page.page_size())
        .cloned()
        .collect();

    QueryResult::new(records, total_count, page.page_size())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;
    use crate::query::Filter;
    use crate::query::PageRequest;
    use crate::query::SortSpec;

    fn sample() -> Vec<Record> {
        vec![
            Record::new(1, "A", "x").with_age(1),
            Record::new(2, "B", "y").with_age(2),
            Record::new(3, "A", "y").with_age(3),
        ]
    }

    fn ids(result: &QueryResult) -> Vec<u64> {
        result.records().iter().map(|r| r.id().0).collect()
    }

    #[test]
    fn test_filter_keeps_input_order() {
        let query = Query::new().filter(Filter::eq("firstName", "A"));
        let result = execute(&sample(), &query, FilterMode::Exact);

        assert_eq!(result.total_count(), 2);
        assert_eq!(result.page_count(), 1);
        assert_eq!(ids(&result), vec![1, 3]);
    }

    #[test]
    fn test_sort_desc_by_age() {
        let query = Query::new().sort(SortSpec::desc("age"));
        let result = execute(&sample(), &query, FilterMode::Exact);

        assert_eq!(ids(&result), vec![3, 2, 1]);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let query = Query::new()
            .filter(Filter::eq("firstName", "A"))
            .filter(Filter::eq("lastName", "y"));
        let result = execute(&sample(), &query, FilterMode::Exact);

        assert_eq!(ids(&result), vec![3]);
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        let query = Query::new().filter(Filter::eq("firstName", "a"));
        let result = execute(&sample(), &query, FilterMode::Exact);

        assert_eq!(result.total_count(), 0);
        assert_eq!(result.page_count(), 0);
        assert!(result.is_empty());
    }

    #[test]
    fn test_ignores_unknown_and_numeric_filters() {
        let query = Query::new()
            .filter(Filter::eq("age", "2"))
            .filter(Filter::eq("txn", "anything"));
        let result = execute(&sample(), &query, FilterMode::Exact);

        assert_eq!(result.total_count(), 3);
    }

    #[test]
    fn test_unknown_sort_key_preserves_order() {
        let query = Query::new().sort(SortSpec::desc("txn"));
        let result = execute(&sample(), &query, FilterMode::Exact);

        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_is_stable_both_ways() {
        let dataset: Vec<Record> = (0..12u64)
            .map(|i| Record::new(i, format!("n{}", i % 3), "x").with_visits((i % 2) as u32))
            .collect();

        for query in [Query::new().sort(SortSpec::asc("visits")), Query::new().sort(SortSpec::desc("visits"))] {
            let result = execute(&dataset, &query.page(PageRequest::first(20).unwrap()), FilterMode::Exact);
            let records = result.records();
            for pair in records.windows(2) {
                if pair[0].visits() == pair[1].visits() {
                    assert!(pair[0].id() < pair[1].id(), "ties must keep input order");
                }
            }
        }
    }

    #[test]
    fn test_paging_slices_and_counts() {
        let dataset: Vec<Record> = (0..25u64).map(|i| Record::new(i, "A", "x")).collect();

        let second = Query::new().page(PageRequest::new(1, 10).unwrap());
        let result = execute(&dataset, &second, FilterMode::Exact);
        assert_eq!(result.total_count(), 25);
        assert_eq!(result.page_count(), 3);
        assert_eq!(ids(&result), (10..20).collect::<Vec<u64>>());

        let last = Query::new().page(PageRequest::new(2, 10).unwrap());
        assert_eq!(execute(&dataset, &last, FilterMode::Exact).len(), 5);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let dataset: Vec<Record> = (0..25u64).map(|i| Record::new(i, "A", "x")).collect();
        let query = Query::new().page(PageRequest::new(3, 10).unwrap());
        let result = execute(&dataset, &query, FilterMode::Exact);

        assert!(result.is_empty());
        assert_eq!(result.total_count(), 25);
        assert_eq!(result.page_count(), 3);

        let far = Query::new().page(PageRequest::new(usize::MAX, 50).unwrap());
        assert!(execute(&dataset, &far, FilterMode::Exact).is_empty());
    }

    #[test]
    fn test_total_count_matches_predicate() {
        let dataset: Vec<Record> = (0..200u64)
            .map(|i| Record::new(i, ["Ada", "Bob", "Cy"][(i % 3) as usize], ["Lee", "Ng"][(i % 2) as usize]))
            .collect();

        let query = Query::new()
            .filter(Filter::eq("firstName", "Bob"))
            .filter(Filter::eq("lastName", "Ng"));
        let result = execute(&dataset, &query, FilterMode::Exact);

        let expected = dataset
            .iter()
            .filter(|r| r.text(Column::FirstName) == Some("Bob") && r.text(Column::LastName) == Some("Ng"))
            .count();
        assert_eq!(result.total_count(), expected);
        assert!(result.total_count() <= dataset.len());
    }

    #[test]
    fn test_fuzzy_mode_matches_loosely() {
        let dataset = vec![
            Record::new(1, "Alexandra", "x"),
            Record::new(2, "Bob", "x"),
            Record::new(3, "alex", "x"),
        ];
        let query = Query::new().filter(Filter::eq("firstName", "alx"));

        assert_eq!(execute(&dataset, &query, FilterMode::Exact).total_count(), 0);
        assert_eq!(ids(&execute(&dataset, &query, FilterMode::Fuzzy)), vec![1, 3]);
    }
}
