//! Sort specification.

use serde::Deserialize;
use serde::Serialize;

use crate::model::Column;

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Advances a column's tri-state sort toggle.
    ///
    /// Unsorted goes to ascending, ascending to descending, and descending
    /// back to unsorted.
    ///
    /// ```
    /// use datagrid_lib::query::Direction;
    ///
    /// assert_eq!(Direction::cycle(None), Some(Direction::Asc));
    /// assert_eq!(Direction::cycle(Some(Direction::Asc)), Some(Direction::Desc));
    /// assert_eq!(Direction::cycle(Some(Direction::Desc)), None);
    /// ```
    pub fn cycle(current: Option<Direction>) -> Option<Direction> {
        match current {
            None => Some(Direction::Asc),
            Some(Direction::Asc) => Some(Direction::Desc),
            Some(Direction::Desc) => None,
        }
    }

    pub fn is_desc(self) -> bool {
        self == Direction::Desc
    }
}

/// The single sort key of a query.
///
/// Only one sort key is honored at a time; setting a new one replaces the
/// previous. A key that does not name a sortable column leaves the input
/// order untouched.
///
/// # Example
///
/// ```
/// use datagrid_lib::query::{Direction, SortSpec};
///
/// let sort = SortSpec::desc("age");
/// assert_eq!(sort.direction(), Direction::Desc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub id: String,
    pub desc: bool,
}

impl SortSpec {
    pub fn new(id: impl Into<String>, direction: Direction) -> Self {
        Self {
            id: id.into(),
            desc: direction.is_desc(),
        }
    }

    /// Creates an ascending sort on a column key.
    pub fn asc(id: impl Into<String>) -> Self {
        Self::new(id, Direction::Asc)
    }

    /// Creates a descending sort on a column key.
    pub fn desc(id: impl Into<String>) -> Self {
        Self::new(id, Direction::Desc)
    }

    pub fn direction(&self) -> Direction {
        if self.desc { Direction::Desc } else { Direction::Asc }
    }

    /// Returns the column to sort by, if the key names a sortable column.
    pub fn column(&self) -> Option<Column> {
        Column::from_key(&self.id).filter(|column| column.is_sortable())
    }
}
