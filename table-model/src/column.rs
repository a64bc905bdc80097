//! FILENAME: table-model/src/column.rs
//! PURPOSE: The table spec data model — what the host DESCRIBES.
//! CONTEXT: A `TableSpec` is an abstract row/column description: column
//! metadata plus pure accessor functions over `[0, row_count)`. The engine
//! treats a spec as immutable except for the one-time normalization pass
//! (see `normalize.rs`). Plain enums here are serializable; the structs
//! holding accessor closures are deliberately not.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::comparator::Comparator;
use crate::value::CellValue;

/// Stable unique identifier of a column within one spec.
pub type ColumnKey = String;

// ============================================================================
// SORT DIRECTION AND INFERRED TYPE
// ============================================================================

/// Direction of an active column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Inferred column value type, used to pick a default cell renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Int,
    Float,
    Text,
}

// ============================================================================
// ACCESSOR FUNCTION TYPES
// ============================================================================

/// Pure accessor from a row index to that row's value in one column.
/// Must be total over `[0, row_count)` and side-effect free.
pub type ValueFn = Box<dyn Fn(usize) -> CellValue + Send + Sync>;

/// Turns a cell value into its display string.
pub type RenderFn = Box<dyn Fn(&CellValue) -> String + Send + Sync>;

/// Renders a column group's member values as one combined cell.
/// Receives the member values and the member column specs, in group order.
pub type GroupRenderFn = Box<dyn Fn(&[CellValue], &[&ColumnSpec]) -> String + Send + Sync>;

// ============================================================================
// COLUMN SPEC
// ============================================================================

/// One column of a table spec (or one member of a column group).
pub struct ColumnSpec {
    /// Stable unique identifier within the spec.
    pub key: ColumnKey,

    /// Display label. Normalization rewrites this with invisible break
    /// opportunities at camel-case humps.
    pub name: String,

    /// Optional tooltip text.
    pub title: Option<String>,

    /// Cosmetic CSS-class hint, opaque to the engine.
    pub class_name: Option<String>,

    /// Value accessor for this column.
    pub value: ValueFn,

    /// Ordering function. Absent means the column is not sortable.
    pub comparator: Option<Comparator>,

    /// When set, nominates this column as the spec's default sort column
    /// with the given direction.
    pub initial_sort: Option<SortDirection>,

    /// Cell renderer. When absent, normalization resolves one from the
    /// inferred column type.
    pub render: Option<RenderFn>,

    /// Inferred value type. Computed at most once per spec instance by
    /// normalization; `None` until then unless supplied by the host.
    pub inferred_type: Option<ColumnType>,
}

impl ColumnSpec {
    pub fn new(key: impl Into<ColumnKey>, name: impl Into<String>, value: ValueFn) -> Self {
        ColumnSpec {
            key: key.into(),
            name: name.into(),
            title: None,
            class_name: None,
            value,
            comparator: None,
            initial_sort: None,
            render: None,
            inferred_type: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_comparator(mut self, comparator: Comparator) -> Self {
        self.comparator = Some(comparator);
        self
    }

    pub fn with_initial_sort(mut self, direction: SortDirection) -> Self {
        self.initial_sort = Some(direction);
        self
    }

    pub fn with_render(mut self, render: RenderFn) -> Self {
        self.render = Some(render);
        self
    }

    /// A column is sortable exactly when it has a comparator.
    pub fn is_sortable(&self) -> bool {
        self.comparator.is_some()
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("sortable", &self.is_sortable())
            .field("initial_sort", &self.initial_sort)
            .field("inferred_type", &self.inferred_type)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// COLUMN GROUP
// ============================================================================

/// Zero or more columns rendered as a single header/cell unit.
pub struct ColumnGroup {
    /// Display label for the group header.
    pub name: String,

    /// Optional tooltip text.
    pub title: Option<String>,

    /// Indices into `TableSpec::columns` of the member columns, in render
    /// order.
    pub columns: Vec<usize>,

    /// Custom combined-cell renderer. When absent, member cells render
    /// individually and are joined with a single space.
    pub render: Option<GroupRenderFn>,
}

impl ColumnGroup {
    pub fn new(name: impl Into<String>, columns: Vec<usize>) -> Self {
        ColumnGroup {
            name: name.into(),
            title: None,
            columns,
            render: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_render(mut self, render: GroupRenderFn) -> Self {
        self.render = Some(render);
        self
    }
}

impl fmt::Debug for ColumnGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnGroup")
            .field("name", &self.name)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SPEC ERRORS
// ============================================================================

/// A misconfigured spec from the host application. Not recoverable — the
/// host has to fix its column definitions.
#[derive(Error, Debug)]
pub enum SpecError {
    #[error("duplicate column key: {0}")]
    DuplicateColumnKey(String),

    #[error("column group '{group}' references column index {index}, but the spec has {column_count} columns")]
    GroupColumnOutOfRange {
        group: String,
        index: usize,
        column_count: usize,
    },

    #[error("column index {index} belongs to more than one column group")]
    OverlappingGroups { index: usize },

    #[error("column index {index} ('{key}') belongs to no column group, but the spec defines groups")]
    UngroupedColumn { index: usize, key: String },
}

// ============================================================================
// TABLE SPEC
// ============================================================================

/// The abstract row/column description consumed by the engine.
///
/// Immutable from the engine's point of view except for the one-time
/// normalization pass, which is keyed to spec *identity* via the `prepared`
/// marker. If the host mutates the underlying row data without creating a
/// new spec, inferred column types can go stale; that matches the intent of
/// identity-keyed preparation and is not detected here.
pub struct TableSpec {
    /// The columns, in declaration order.
    pub columns: Vec<ColumnSpec>,

    /// Optional column grouping. When present, every column must belong to
    /// exactly one group (validated).
    pub column_groups: Option<Vec<ColumnGroup>>,

    /// Number of rows the value accessors are total over.
    pub row_count: usize,

    /// Normalization marker. Set once by `normalize`; never cleared.
    pub(crate) prepared: bool,
}

impl TableSpec {
    pub fn new(columns: Vec<ColumnSpec>, row_count: usize) -> Self {
        TableSpec {
            columns,
            column_groups: None,
            row_count,
            prepared: false,
        }
    }

    pub fn with_column_groups(mut self, groups: Vec<ColumnGroup>) -> Self {
        self.column_groups = Some(groups);
        self
    }

    /// Whether normalization has already run on this spec instance.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// The value of one cell. `row` must be in `[0, row_count)`; `col` must
    /// be a valid column index.
    pub fn value_at(&self, row: usize, col: usize) -> CellValue {
        (self.columns[col].value)(row)
    }

    /// Checks the spec's structural invariants: unique column keys, group
    /// member indices in range, and groups forming a partition of the
    /// columns when grouping is used.
    pub fn validate(&self) -> Result<(), SpecError> {
        let mut keys = FxHashSet::default();
        for col in &self.columns {
            if !keys.insert(col.key.as_str()) {
                return Err(SpecError::DuplicateColumnKey(col.key.clone()));
            }
        }

        if let Some(groups) = &self.column_groups {
            let mut grouped = FxHashSet::default();
            for group in groups {
                for &index in &group.columns {
                    if index >= self.columns.len() {
                        return Err(SpecError::GroupColumnOutOfRange {
                            group: group.name.clone(),
                            index,
                            column_count: self.columns.len(),
                        });
                    }
                    if !grouped.insert(index) {
                        return Err(SpecError::OverlappingGroups { index });
                    }
                }
            }
            for index in 0..self.columns.len() {
                if !grouped.contains(&index) {
                    return Err(SpecError::UngroupedColumn {
                        index,
                        key: self.columns[index].key.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl fmt::Debug for TableSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableSpec")
            .field("columns", &self.columns)
            .field("column_groups", &self.column_groups)
            .field("row_count", &self.row_count)
            .field("prepared", &self.prepared)
            .finish()
    }
}
