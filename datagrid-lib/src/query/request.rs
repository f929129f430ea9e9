//! The request sent to a query engine.

use serde::Serialize;

use super::Filter;
use super::Filters;
use super::PageRequest;
use super::SortSpec;

/// Filters, sort key and page of one engine call.
///
/// # Example
///
/// ```
/// use datagrid_lib::query::{Filter, PageRequest, Query, SortSpec};
///
/// let query = Query::new()
///     .filter(Filter::eq("firstName", "Ada"))
///     .sort(SortSpec::desc("age"))
///     .page(PageRequest::new(2, 20).unwrap());
///
/// assert_eq!(query.page_request().offset(), 40);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub(crate) filters: Filters,
    pub(crate) sort: Option<SortSpec>,
    pub(crate) page: PageRequest,
}

/// JSON shape of the table state dump.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StateDump<'a> {
    sort_by: Vec<&'a SortSpec>,
    filters: &'a Filters,
    page_index: usize,
    page_size: usize,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the filter for the filter's column id.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.set(&filter.id, filter.value());
        self
    }

    /// Replaces all filters.
    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Sets the sort key.
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    pub fn filter_set(&self) -> &Filters {
        &self.filters
    }

    pub fn sort_spec(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page_request(&self) -> PageRequest {
        self.page
    }

    /// Renders `{ sortBy, filters, pageIndex, pageSize }` as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        let dump = StateDump {
            sort_by: self.sort.iter().collect(),
            filters: &self.filters,
            page_index: self.page.page_index(),
            page_size: self.page.page_size(),
        };
        serde_json::to_string_pretty(&dump)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_dump_shape() {
        let query = Query::new()
            .filter(Filter::eq("lastName", "Lovelace"))
            .sort(SortSpec::desc("age"))
            .page(PageRequest::new(1, 20).unwrap());

        let json: serde_json::Value = serde_json::from_str(&query.to_json_pretty().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sortBy": [{ "id": "age", "desc": true }],
                "filters": [{ "id": "lastName", "value": "Lovelace" }],
                "pageIndex": 1,
                "pageSize": 20,
            })
        );
    }

    #[test]
    fn test_state_dump_without_sort() {
        let json: serde_json::Value =
            serde_json::from_str(&Query::new().to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["sortBy"], serde_json::json!([]));
        assert_eq!(json["filters"], serde_json::json!([]));
        assert_eq!(json["pageSize"], 10);
    }
}
