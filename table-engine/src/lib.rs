//! FILENAME: table-engine/src/lib.rs
//! Tabular data presentation engine.
//!
//! This crate derives everything a view layer needs to render a table from
//! an abstract `TableSpec` (see `table-model`): the sorted row permutation,
//! the current page window, an automatically estimated page size, selection
//! state, and the assembled view model. Rendering itself is out of scope —
//! the host supplies user events (sort toggles, page navigation, selection)
//! and consumes the serializable `TableView`.
//!
//! Layers:
//! - `sort`: Sort state machine and the stable row permutation
//! - `paging`: Page count, page window, navigation
//! - `page_size`: Two-phase "render, measure, lock" page-size estimation
//! - `selection`: Row-identity-based selection tracking
//! - `view`: Renderable output for the host (WHAT we display)
//! - `presenter`: The coordinator composing the engines (HOW we derive)

pub mod page_size;
pub mod paging;
pub mod presenter;
pub mod selection;
pub mod sort;
pub mod view;

pub use page_size::{
    PageMeasurement, PageSizeEstimator, PageSizeMode, DEFAULT_PROVISIONAL_PAGE_SIZE,
};
pub use paging::{page_count, page_window, PageWindow, PagingState};
pub use presenter::{Presenter, TableConfig};
pub use selection::{SelectionCallback, SelectionTracker};
pub use sort::{compute_order, SortState};
pub use view::{HeaderView, RowView, SortDescriptor, TableView};
