//! Column filters.

use serde::Deserialize;
use serde::Serialize;

use crate::model::Column;

/// A filter value for one column.
///
/// A missing or empty value means "no filter". The id is kept verbatim so a
/// filter on an unknown column survives in table state; the engine simply
/// does not apply it.
///
/// # Example
///
/// ```
/// use datagrid_lib::query::Filter;
///
/// let filter = Filter::eq("firstName", "Ada");
/// assert_eq!(filter.value(), Some("Ada"));
///
/// let cleared = Filter::eq("firstName", "");
/// assert!(!cleared.is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Filter {
    /// Creates an equality filter on a column key.
    pub fn eq(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: Some(value.into()),
        }
    }

    /// Creates a filter without a value.
    pub fn cleared(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: None,
        }
    }

    /// Returns the filter value, treating the empty string as absent.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|value| !value.is_empty())
    }

    /// Returns `true` if this filter carries a value.
    pub fn is_active(&self) -> bool {
        self.value().is_some()
    }

    /// Returns the column this filter applies to, if the engine honors it.
    pub fn column(&self) -> Option<Column> {
        Column::from_key(&self.id).filter(|column| column.is_filterable())
    }
}

/// How filter values are matched against cell text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Case-sensitive string equality.
    #[default]
    Exact,
    /// Case-insensitive fuzzy matching.
    Fuzzy,
}

/// The set of column filters, at most one per column id.
///
/// Filters are conjunctive: a record must satisfy all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters(Vec<Filter>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or clears the filter for a column id.
    ///
    /// A `None` or empty value removes the filter. Returns `true` if the set
    /// changed.
    pub fn set(&mut self, id: &str, value: Option<&str>) -> bool {
        let value = value.filter(|value| !value.is_empty());
        let position = self.0.iter().position(|filter| filter.id == id);

        match (position, value) {
            (Some(index), None) => {
                self.0.remove(index);
                true
            }
            (Some(index), Some(value)) => {
                let filter = &mut self.0[index];
                if filter.value() == Some(value) {
                    return false;
                }
                filter.value = Some(value.to_string());
                true
            }
            (None, Some(value)) => {
                self.0.push(Filter::eq(id, value));
                true
            }
            (None, None) => false,
        }
    }

    /// Returns the value filtering a column id, if any.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|filter| filter.id == id)
            .and_then(Filter::value)
    }

    /// Removes all filters. Returns `true` if any were present.
    pub fn clear(&mut self) -> bool {
        let changed = !self.0.is_empty();
        self.0.clear();
        changed
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.0.iter()
    }

    /// Returns the filters the engine applies, resolved to their columns.
    pub fn applicable(&self) -> impl Iterator<Item = (Column, &str)> {
        self.0
            .iter()
            .filter_map(|filter| Some((filter.column()?, filter.value()?)))
    }
}

impl FromIterator<Filter> for Filters {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        let mut filters = Filters::new();
        for filter in iter {
            filters.set(&filter.id, filter.value());
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_and_removes() {
        let mut filters = Filters::new();

        assert!(filters.set("firstName", Some("Ada")));
        assert!(!filters.set("firstName", Some("Ada")));
        assert!(filters.set("firstName", Some("Bob")));
        assert_eq!(filters.len(), 1);
        assert_eq!(filters.get("firstName"), Some("Bob"));

        assert!(filters.set("firstName", Some("")));
        assert!(filters.is_empty());
        assert!(!filters.set("firstName", None));
    }

    #[test]
    fn test_applicable_skips_unknown_and_numeric_columns() {
        let filters: Filters = [
            Filter::eq("firstName", "Ada"),
            Filter::eq("age", "36"),
            Filter::eq("txn", "x"),
            Filter::cleared("lastName"),
        ]
        .into_iter()
        .collect();

        let applied: Vec<(Column, &str)> = filters.applicable().collect();
        assert_eq!(applied, vec![(Column::FirstName, "Ada")]);
        assert_eq!(filters.len(), 3);
    }

    #[test]
    fn test_serializes_as_list() {
        let filters: Filters = [Filter::eq("lastName", "Lovelace")].into_iter().collect();
        let json = serde_json::to_string(&filters).unwrap();
        assert_eq!(json, r#"[{"id":"lastName","value":"Lovelace"}]"#);
    }
}
