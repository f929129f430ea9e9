//! Person records

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::Column;

/// Stable primary key of a [`Record`].
///
/// Row selection is tracked by id, so a row that reappears after a re-query
/// is recognized as the same logical row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        RecordId(value)
    }
}

impl From<RecordId> for u64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Relationship status of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Relationship,
    Complicated,
    Single,
}

/// A fixed-shape row of the people table.
///
/// Records are immutable once built. `sub_rows` is an opaque nested payload
/// that filtering and sorting never look at.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{Column, Record};
///
/// let record = Record::new(1, "Ada", "Lovelace").with_age(36);
/// assert_eq!(record.text(Column::FirstName), Some("Ada"));
/// assert_eq!(record.number(Column::Age), Some(36));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub(crate) id: RecordId,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) age: u32,
    pub(crate) visits: u32,
    pub(crate) progress: u32,
    pub(crate) status: Status,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) sub_rows: Vec<Record>,
}

impl Record {
    /// Creates a record with zeroed numeric fields.
    pub fn new(id: u64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: RecordId(id),
            first_name: first_name.into(),
            last_name: last_name.into(),
            age: 0,
            visits: 0,
            progress: 0,
            status: Status::Single,
            sub_rows: Vec::new(),
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn with_visits(mut self, visits: u32) -> Self {
        self.visits = visits;
        self
    }

    pub fn with_progress(mut self, progress: u32) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_sub_rows(mut self, sub_rows: Vec<Record>) -> Self {
        self.sub_rows = sub_rows;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn visits(&self) -> u32 {
        self.visits
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn sub_rows(&self) -> &[Record] {
        &self.sub_rows
    }

    // =========================================================================
    // Column access
    // =========================================================================

    /// Returns the value of a text column, or `None` for numeric columns.
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::FirstName => Some(&self.first_name),
            Column::LastName => Some(&self.last_name),
            _ => None,
        }
    }

    /// Returns the value of a numeric column, or `None` for text columns.
    pub fn number(&self, column: Column) -> Option<u32> {
        match column {
            Column::Age => Some(self.age),
            Column::Visits => Some(self.visits),
            Column::Progress => Some(self.progress),
            _ => None,
        }
    }

    /// Formats a column value as cell text.
    pub fn cell(&self, column: Column) -> String {
        match self.text(column) {
            Some(text) => text.to_string(),
            None => self.number(column).unwrap_or_default().to_string(),
        }
    }

    /// Compares two records by a single column, ascending.
    pub fn cmp_by(&self, other: &Record, column: Column) -> Ordering {
        match column {
            Column::FirstName => self.first_name.cmp(&other.first_name),
            Column::LastName => self.last_name.cmp(&other.last_name),
            Column::Age => self.age.cmp(&other.age),
            Column::Visits => self.visits.cmp(&other.visits),
            Column::Progress => self.progress.cmp(&other.progress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_access() {
        let record = Record::new(7, "Ada", "Lovelace")
            .with_age(36)
            .with_visits(12)
            .with_progress(90);

        assert_eq!(record.text(Column::LastName), Some("Lovelace"));
        assert_eq!(record.text(Column::Age), None);
        assert_eq!(record.number(Column::Visits), Some(12));
        assert_eq!(record.number(Column::FirstName), None);
        assert_eq!(record.cell(Column::Progress), "90");
        assert_eq!(record.cell(Column::FirstName), "Ada");
    }

    #[test]
    fn test_cmp_by_column() {
        let a = Record::new(1, "Ada", "Zed").with_age(40);
        let b = Record::new(2, "Bob", "Abe").with_age(40);

        assert_eq!(a.cmp_by(&b, Column::FirstName), Ordering::Less);
        assert_eq!(a.cmp_by(&b, Column::LastName), Ordering::Greater);
        assert_eq!(a.cmp_by(&b, Column::Age), Ordering::Equal);
    }

    #[test]
    fn test_serializes_with_wire_keys() {
        let record = Record::new(3, "Ada", "Lovelace").with_status(Status::Complicated);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["status"], "complicated");
        assert!(json.get("subRows").is_none());
    }
}
