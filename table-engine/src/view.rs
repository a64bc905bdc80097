//! FILENAME: table-engine/src/view.rs
//! PURPOSE: The renderable output — WHAT we display.
//! CONTEXT: The presenter turns a spec plus the current sort/paging/selection
//! states into this serializable view model. The rendering collaborator
//! consumes it as-is: rows are already ordered, windowed and rendered to
//! strings, and the header metadata carries the affordances (sortability,
//! active direction) the view needs for its controls.

use serde::{Deserialize, Serialize};

use table_model::{ColumnKey, SortDirection};

/// One rendered header unit: a single column, or a column group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderView {
    /// The column key, or the group name for group units.
    pub key: ColumnKey,

    /// Display label (already formatted with break opportunities).
    pub label: String,

    /// Optional tooltip text.
    pub title: Option<String>,

    /// Cosmetic class hint, opaque to the engine.
    pub class_name: Option<String>,

    /// Column index a sort toggle on this header should target. `None`
    /// when the unit is not sortable (no comparator, or a multi-column
    /// group).
    pub sort_column: Option<usize>,

    /// Direction indicator when this unit's column is the active sort.
    pub sort_direction: Option<SortDirection>,
}

impl HeaderView {
    /// Whether the header should render a sort affordance.
    pub fn sortable(&self) -> bool {
        self.sort_column.is_some()
    }
}

/// The active sort, keyed by column for the host's controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub key: ColumnKey,
    pub direction: SortDirection,
}

/// One rendered row of the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowView {
    /// The row's index in unsorted row space. Stable across re-sorts; this
    /// is the index selection events refer to.
    pub original_index: usize,

    /// Whether this row is the selected one.
    pub selected: bool,

    /// One rendered cell per header unit, in header order.
    pub cells: Vec<String>,
}

/// The complete view model for one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    /// Header units in render order.
    pub headers: Vec<HeaderView>,

    /// The rows of the current page, in sorted order.
    pub rows: Vec<RowView>,

    /// Total (unpaged) row count.
    pub row_count: usize,

    /// Total number of pages (at least 1).
    pub page_count: usize,

    /// The clamped 1-based current page.
    pub current_page: usize,

    /// The active sort, if any.
    pub sort: Option<SortDescriptor>,

    /// Whether the table tracks selection at all.
    pub selectable: bool,
}

impl TableView {
    /// The view of a table with no spec attached: no headers, no rows, one
    /// empty page.
    pub fn empty() -> Self {
        TableView {
            headers: Vec::new(),
            rows: Vec::new(),
            row_count: 0,
            page_count: 1,
            current_page: 1,
            sort: None,
            selectable: false,
        }
    }
}
