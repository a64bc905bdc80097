//! FILENAME: table-model/src/lib.rs
//! Shared table spec types for the presentation engine.
//!
//! This crate defines what a table IS from the engine's point of view:
//! cell values, comparator combinators, column/group/table specs, and the
//! Column Model (the one-shot normalization pass). The derivation engines
//! live in `table-engine`, which depends on this crate only for types.
//!
//! Layers:
//! - `value`: The cell value enum and its classification helpers
//! - `comparator`: Ordering combinators for sortable columns
//! - `strings`: Column label formatting
//! - `column`: ColumnSpec / ColumnGroup / TableSpec / SpecError
//! - `normalize`: Type inference and default renderer resolution

pub mod column;
pub mod comparator;
pub mod normalize;
pub mod strings;
pub mod value;

pub use column::{
    ColumnGroup, ColumnKey, ColumnSpec, ColumnType, GroupRenderFn, RenderFn, SortDirection,
    SpecError, TableSpec, ValueFn,
};
pub use comparator::{chained, comparing_on, natural, natural_order, reversed, Comparator};
pub use normalize::{normalize, TYPE_SAMPLE_ROWS};
pub use strings::insert_breaks_at_camel_case;
pub use value::CellValue;
