//! Table columns

use std::fmt;

/// A data column of the people table.
///
/// Filters and sort keys address columns by their wire key (`"firstName"`,
/// `"age"`, ...). Keys that do not resolve to a column are carried in table
/// state but never applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    FirstName,
    LastName,
    Age,
    Visits,
    Progress,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 5] = [
        Column::FirstName,
        Column::LastName,
        Column::Age,
        Column::Visits,
        Column::Progress,
    ];

    /// Resolves a wire key to a column.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.key() == key)
    }

    /// Returns the wire key used by filters and sort specs.
    pub fn key(self) -> &'static str {
        match self {
            Column::FirstName => "firstName",
            Column::LastName => "lastName",
            Column::Age => "age",
            Column::Visits => "visits",
            Column::Progress => "progress",
        }
    }

    /// Returns the header label.
    pub fn header(self) -> &'static str {
        match self {
            Column::FirstName => "First Name",
            Column::LastName => "Last Name",
            Column::Age => "Age",
            Column::Visits => "Visits",
            Column::Progress => "Profile Progress",
        }
    }

    /// Returns `true` if the engine applies filters on this column.
    ///
    /// Only the name columns accept filters; numeric columns are sort-only.
    pub fn is_filterable(self) -> bool {
        matches!(self, Column::FirstName | Column::LastName)
    }

    /// Returns `true` if rows can be ordered by this column.
    pub fn is_sortable(self) -> bool {
        true
    }

    /// Returns `true` for integer columns (rendered right-aligned).
    pub fn is_numeric(self) -> bool {
        !self.is_filterable()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
