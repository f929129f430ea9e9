//! Row selection by record id.

use std::collections::BTreeSet;

use crate::model::Record;
use crate::model::RecordId;

/// Selected rows of the current page.
///
/// Only ids present on the page can be selected. The selection does not
/// follow rows across re-queries; the controller clears it whenever a new
/// page arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: BTreeSet<RecordId>,
}

impl Selection {
    /// Replaces the selection with the given ids that are on `page`.
    /// Returns true if the selection changed.
    pub(crate) fn replace(&mut self, page: &[Record], ids: impl IntoIterator<Item = RecordId>) -> bool {
        let on_page: BTreeSet<RecordId> = page.iter().map(Record::id).collect();
        let next: BTreeSet<RecordId> = ids.into_iter().filter(|id| on_page.contains(id)).collect();
        if next == self.selected {
            return false;
        }
        self.selected = next;
        true
    }

    /// Toggles one row. Ids not on `page` are ignored.
    pub(crate) fn toggle(&mut self, page: &[Record], id: RecordId) -> bool {
        if !page.iter().any(|record| record.id() == id) {
            return false;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        true
    }

    /// Selects every row of `page`, or clears the selection if all of them
    /// already are.
    pub(crate) fn toggle_all(&mut self, page: &[Record]) -> bool {
        if page.is_empty() {
            return false;
        }
        if page.iter().all(|record| self.selected.contains(&record.id())) {
            self.selected.clear();
        } else {
            self.selected = page.iter().map(Record::id).collect();
        }
        true
    }

    pub(crate) fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }
}
