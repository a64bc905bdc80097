//! FILENAME: table-engine/src/sort.rs
//! PURPOSE: The Sort Engine — active sort column state and the row permutation.
//! CONTEXT: At most one column is sorted at a time. Toggling an inactive
//! sortable column activates it descending (or with its nominated initial
//! direction, once); toggling the active column flips the direction. The
//! permutation is a stable sort of the original row indices; ties keep
//! their original relative order.

use log::debug;
use serde::{Deserialize, Serialize};

use table_model::{SortDirection, TableSpec};

/// Per-table sort state. One instance per table-spec identity; reset by
/// re-seeding from the new spec when the identity changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Index of the active sort column, if any.
    pub column: Option<usize>,

    /// Direction of the active sort. `Some` exactly when `column` is.
    pub direction: Option<SortDirection>,

    /// Whether the nominated default-sort column's initial direction may
    /// still be applied, on that column's first activation only.
    initial_pending: bool,
}

/// The spec's nominated default-sort column: the first sortable column
/// carrying an initial direction.
fn nominated_column(spec: &TableSpec) -> Option<usize> {
    spec.columns
        .iter()
        .position(|c| c.is_sortable() && c.initial_sort.is_some())
}

impl SortState {
    /// An unsorted state.
    pub fn unsorted() -> Self {
        SortState {
            column: None,
            direction: None,
            initial_pending: true,
        }
    }

    /// Seeds the state from the spec's nominated default-sort column
    /// (the first sortable column carrying an initial direction), or
    /// unsorted when the spec nominates none.
    pub fn initial(spec: &TableSpec) -> Self {
        match nominated_column(spec) {
            Some(index) => SortState {
                column: Some(index),
                direction: spec.columns[index].initial_sort,
                initial_pending: false,
            },
            None => SortState::unsorted(),
        }
    }

    /// Handles a "toggle sort on column" event. No-op for unsortable
    /// columns and out-of-range indices.
    pub fn toggle(&mut self, spec: &TableSpec, column: usize) {
        let Some(col) = spec.columns.get(column) else {
            return;
        };
        if !col.is_sortable() {
            return;
        }

        if self.column == Some(column) {
            self.direction = self
                .direction
                .map(SortDirection::reverse)
                .or(Some(SortDirection::Descending));
        } else {
            let direction = match col.initial_sort {
                Some(initial)
                    if self.initial_pending && nominated_column(spec) == Some(column) =>
                {
                    self.initial_pending = false;
                    initial
                }
                _ => SortDirection::Descending,
            };
            self.column = Some(column);
            self.direction = Some(direction);
        }
        debug!(
            "sort toggled: column={} direction={:?}",
            col.key, self.direction
        );
    }

    /// The direction shown on one column's header, if that column is the
    /// active sort column.
    pub fn direction_of(&self, column: usize) -> Option<SortDirection> {
        if self.column == Some(column) {
            self.direction
        } else {
            None
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        SortState::unsorted()
    }
}

/// Computes the row-index permutation for the current sort state: the
/// identity permutation when unsorted, otherwise a stable sort of
/// `0..row_count` by the active column's comparator (descending reverses
/// the comparator's sign). Equal rows keep their original relative order;
/// an explicit original-index tie-break makes the output deterministic
/// independent of the sort primitive.
pub fn compute_order(spec: &TableSpec, state: &SortState) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..spec.row_count).collect();

    let (Some(column), Some(direction)) = (state.column, state.direction) else {
        return indices;
    };
    let Some(comparator) = spec.columns.get(column).and_then(|c| c.comparator.as_ref()) else {
        return indices;
    };

    indices.sort_by(|&a, &b| {
        let ord = comparator(&spec.value_at(a, column), &spec.value_at(b, column));
        let ord = match direction {
            SortDirection::Descending => ord.reverse(),
            SortDirection::Ascending => ord,
        };
        ord.then(a.cmp(&b))
    });
    indices
}
