//! FILENAME: table-engine/src/presenter.rs
//! PURPOSE: The Presentation Coordinator — composes the engines into a view.
//! CONTEXT: One `Presenter` owns one table-spec identity plus its sort,
//! paging and selection states and the page-size estimator. User events map
//! 1:1 onto state transitions; `present` derives the view model from the
//! current states without mutating any of them, so identical states always
//! yield identical output.

use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use table_model::{
    normalize, CellValue, ColumnGroup, ColumnSpec, SpecError, TableSpec,
};

use crate::page_size::{PageMeasurement, PageSizeEstimator, PageSizeMode};
use crate::paging::{self, PagingState};
use crate::selection::SelectionTracker;
use crate::sort::{compute_order, SortState};
use crate::view::{HeaderView, RowView, SortDescriptor, TableView};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Host configuration for one table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Fixed rows per page, or measure-once automatic sizing.
    pub page_size: PageSizeMode,
}

impl TableConfig {
    /// A fixed page size.
    ///
    /// # Panics
    /// Panics if `page_size < 1` — a contract violation by the host.
    pub fn fixed(page_size: usize) -> Self {
        assert!(page_size >= 1, "page_size must be at least 1");
        TableConfig {
            page_size: PageSizeMode::Fixed(page_size),
        }
    }

    /// "Fill the available space" paging via the page-size estimator.
    pub fn auto() -> Self {
        TableConfig {
            page_size: PageSizeMode::Auto,
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig::auto()
    }
}

// ============================================================================
// HEADER UNITS
// ============================================================================

/// One rendered unit of the header row: a bare column, or a column group
/// collapsing several columns into one cell.
enum HeaderUnit<'a> {
    Column(usize),
    Group(&'a ColumnGroup),
}

fn header_units(spec: &TableSpec) -> Vec<HeaderUnit<'_>> {
    match &spec.column_groups {
        Some(groups) => groups.iter().map(HeaderUnit::Group).collect(),
        None => (0..spec.columns.len()).map(HeaderUnit::Column).collect(),
    }
}

// ============================================================================
// PRESENTER
// ============================================================================

/// The coordinator for one table instance.
#[derive(Debug)]
pub struct Presenter {
    config: TableConfig,
    spec: Option<TableSpec>,
    sort: SortState,
    paging: PagingState,
    estimator: PageSizeEstimator,
    selection: Option<SelectionTracker>,
}

impl Presenter {
    pub fn new(config: TableConfig) -> Self {
        if let PageSizeMode::Fixed(size) = config.page_size {
            assert!(size >= 1, "page_size must be at least 1");
        }
        Presenter {
            config,
            spec: None,
            sort: SortState::unsorted(),
            paging: PagingState::new(),
            estimator: PageSizeEstimator::new(),
            selection: None,
        }
    }

    /// Enables selection tracking. Without a tracker the presenter keeps no
    /// selection state at all and the view reports `selectable: false`.
    pub fn with_selection(mut self, tracker: SelectionTracker) -> Self {
        self.selection = Some(tracker);
        self
    }

    /// Attaches a spec. A new spec is a new table: sort is re-seeded from
    /// the spec's nominated default, paging returns to page 1, and the
    /// page-size estimator forgets its locked measurement. Selection is
    /// owned by the host collaborator and is deliberately left alone.
    pub fn attach(&mut self, mut spec: TableSpec) -> Result<(), SpecError> {
        spec.validate()?;
        normalize(&mut spec);

        self.sort = SortState::initial(&spec);
        self.paging.reset();
        self.estimator.reset();
        debug!(
            "spec attached: {} columns, {} rows",
            spec.columns.len(),
            spec.row_count
        );
        self.spec = Some(spec);
        Ok(())
    }

    pub fn spec(&self) -> Option<&TableSpec> {
        self.spec.as_ref()
    }

    fn effective_page_size(&self) -> usize {
        match self.config.page_size {
            PageSizeMode::Fixed(size) => size,
            PageSizeMode::Auto => self.estimator.page_size(),
        }
    }

    fn current_page_count(&self) -> usize {
        let rows = self.spec.as_ref().map_or(0, |s| s.row_count);
        paging::page_count(rows, self.effective_page_size())
    }

    // ------------------------------------------------------------------
    // Event surface. Each method is one discrete user command; all are
    // synchronous state transitions visible to the next `present` call.
    // ------------------------------------------------------------------

    /// "Toggle sort on column" event. No-op for unsortable columns.
    pub fn toggle_sort(&mut self, column: usize) {
        if let Some(spec) = &self.spec {
            self.sort.toggle(spec, column);
        }
    }

    pub fn page_first(&mut self) {
        self.paging.first();
    }

    pub fn page_prev(&mut self) {
        let pages = self.current_page_count();
        self.paging.prev(pages);
    }

    pub fn page_next(&mut self) {
        let pages = self.current_page_count();
        self.paging.next(pages);
    }

    pub fn page_last(&mut self) {
        let pages = self.current_page_count();
        self.paging.last(pages);
    }

    /// "Go to page" event, e.g. from a typed page number. Clamps silently.
    pub fn set_page(&mut self, page: i64) {
        let pages = self.current_page_count();
        self.paging.set(page, pages);
    }

    /// "Select row at original index" event. Ignored when selection is
    /// disabled (no tracker supplied).
    pub fn select(&mut self, index: Option<usize>) {
        if let Some(tracker) = &mut self.selection {
            tracker.select(index);
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selection.as_ref().and_then(SelectionTracker::selected)
    }

    /// Feeds a post-layout measurement to the page-size estimator. Only
    /// meaningful in `Auto` mode; ignored for fixed page sizes.
    pub fn observe_page_metrics(&mut self, measurement: PageMeasurement) {
        if self.config.page_size == PageSizeMode::Auto {
            self.estimator.observe(measurement);
        }
    }

    // ------------------------------------------------------------------
    // View derivation
    // ------------------------------------------------------------------

    /// Assembles the view model for the current states: normalize (already
    /// done at attach) -> order -> window -> rendered cells.
    pub fn present(&self) -> TableView {
        let Some(spec) = &self.spec else {
            return TableView::empty();
        };

        let order = compute_order(spec, &self.sort);
        let window = paging::page_window(
            spec.row_count,
            self.effective_page_size(),
            self.paging.current_page(),
        );
        let units = header_units(spec);

        let headers = units
            .iter()
            .map(|unit| self.header_view(spec, unit))
            .collect();

        let selected = self.selected();
        let mut rows = Vec::with_capacity(window.end - window.start);
        for position in window.start..window.end {
            let original_index = order[position];
            let cells = units
                .iter()
                .map(|unit| match unit {
                    HeaderUnit::Column(j) => render_column_cell(spec, *j, original_index),
                    HeaderUnit::Group(group) => render_group_cell(spec, group, original_index),
                })
                .collect();
            rows.push(RowView {
                original_index,
                selected: selected == Some(original_index),
                cells,
            });
        }

        let sort = match (self.sort.column, self.sort.direction) {
            (Some(column), Some(direction)) => Some(SortDescriptor {
                key: spec.columns[column].key.clone(),
                direction,
            }),
            _ => None,
        };

        TableView {
            headers,
            rows,
            row_count: spec.row_count,
            page_count: window.page_count,
            current_page: window.current_page,
            sort,
            selectable: self.selection.is_some(),
        }
    }

    fn header_view(&self, spec: &TableSpec, unit: &HeaderUnit<'_>) -> HeaderView {
        match unit {
            HeaderUnit::Column(j) => {
                let col = &spec.columns[*j];
                HeaderView {
                    key: col.key.clone(),
                    label: col.name.clone(),
                    title: col.title.clone(),
                    class_name: col.class_name.clone(),
                    sort_column: col.is_sortable().then_some(*j),
                    sort_direction: self.sort.direction_of(*j),
                }
            }
            HeaderUnit::Group(group) => {
                // A group header is sortable only when it wraps exactly one
                // sortable column; a multi-column group has no single order.
                let sort_column = match group.columns.as_slice() {
                    &[j] if spec.columns[j].is_sortable() => Some(j),
                    _ => None,
                };
                HeaderView {
                    key: group.name.clone(),
                    label: group.name.clone(),
                    title: group.title.clone(),
                    class_name: None,
                    sort_column,
                    sort_direction: sort_column.and_then(|j| self.sort.direction_of(j)),
                }
            }
        }
    }
}

fn render_column_cell(spec: &TableSpec, column: usize, row: usize) -> String {
    let col = &spec.columns[column];
    let value = (col.value)(row);
    match &col.render {
        Some(render) => render(&value),
        None => value.display(),
    }
}

fn render_group_cell(spec: &TableSpec, group: &ColumnGroup, row: usize) -> String {
    match &group.render {
        Some(render) => {
            let values: SmallVec<[CellValue; 4]> = group
                .columns
                .iter()
                .map(|&j| spec.value_at(row, j))
                .collect();
            let columns: SmallVec<[&ColumnSpec; 4]> =
                group.columns.iter().map(|&j| &spec.columns[j]).collect();
            render(&values, &columns)
        }
        None => {
            let cells: Vec<String> = group
                .columns
                .iter()
                .map(|&j| render_column_cell(spec, j, row))
                .collect();
            cells.join(" ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use table_model::{natural, SortDirection};

    fn int_column(key: &str, values: Vec<i64>) -> ColumnSpec {
        ColumnSpec::new(key, key, Box::new(move |i| CellValue::from(values[i])))
            .with_comparator(natural())
    }

    /// 23 rows of one sortable integer column: [5, 3, 3, 9, 0, 1, ..., 18].
    fn spec_23_rows() -> TableSpec {
        let mut values = vec![5, 3, 3, 9];
        values.extend(0..19i64);
        TableSpec::new(vec![int_column("n", values)], 23)
    }

    #[test]
    fn test_present_without_spec_is_empty() {
        let presenter = Presenter::new(TableConfig::fixed(10));
        let view = presenter.present();
        assert!(view.headers.is_empty());
        assert_eq!(view.page_count, 1);
    }

    #[test]
    fn test_end_to_end_sort_and_paging() {
        let mut presenter = Presenter::new(TableConfig::fixed(10));
        presenter.attach(spec_23_rows()).unwrap();

        let view = presenter.present();
        assert_eq!(view.page_count, 3);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.rows.len(), 10);
        // Unsorted: identity order.
        assert_eq!(view.rows[0].original_index, 0);
        assert_eq!(view.rows[0].cells, vec!["5".to_string()]);

        // First toggle sorts descending.
        presenter.toggle_sort(0);
        let view = presenter.present();
        assert_eq!(view.sort.as_ref().unwrap().key, "n");
        assert_eq!(view.sort.as_ref().unwrap().direction, SortDirection::Descending);
        // Max value 18 (original index 22) first, then 17, 16...
        assert_eq!(view.rows[0].original_index, 22);
        assert_eq!(view.rows[0].cells, vec!["18".to_string()]);

        // set(5) clamps to the last page (3).
        presenter.set_page(5);
        let view = presenter.present();
        assert_eq!(view.current_page, 3);
        assert_eq!(view.rows.len(), 3);
    }

    #[test]
    fn test_ties_keep_original_order_when_sorted() {
        let mut presenter = Presenter::new(TableConfig::fixed(25));
        presenter.attach(spec_23_rows()).unwrap();

        presenter.toggle_sort(0); // desc
        presenter.toggle_sort(0); // asc
        let view = presenter.present();

        // Values 3 appear at original indices 1, 2 and 7 (the literal 3 in
        // the 0..19 run); ascending order must keep 1 before 2 before 7.
        let threes: Vec<usize> = view
            .rows
            .iter()
            .filter(|r| r.cells[0] == "3")
            .map(|r| r.original_index)
            .collect();
        assert_eq!(threes, vec![1, 2, 7]);
    }

    #[test]
    fn test_present_is_pure() {
        let mut presenter = Presenter::new(TableConfig::fixed(10));
        presenter.attach(spec_23_rows()).unwrap();
        presenter.toggle_sort(0);
        presenter.page_next();

        let first = presenter.present();
        let second = presenter.present();
        assert_eq!(first, second);
    }

    #[test]
    fn test_attach_resets_sort_and_paging() {
        let mut presenter = Presenter::new(TableConfig::fixed(10));
        presenter.attach(spec_23_rows()).unwrap();
        presenter.toggle_sort(0);
        presenter.page_last();

        presenter.attach(spec_23_rows()).unwrap();
        let view = presenter.present();
        assert_eq!(view.current_page, 1);
        assert!(view.sort.is_none());
    }

    #[test]
    fn test_attach_rejects_invalid_spec() {
        let mut presenter = Presenter::new(TableConfig::fixed(10));
        let spec = TableSpec::new(
            vec![int_column("a", vec![1]), int_column("a", vec![2])],
            1,
        );
        assert!(presenter.attach(spec).is_err());
        assert!(presenter.spec().is_none());
    }

    #[test]
    fn test_initial_sort_column_seeds_view() {
        let col = int_column("n", (0..5).collect()).with_initial_sort(SortDirection::Ascending);
        let spec = TableSpec::new(vec![col], 5);

        let mut presenter = Presenter::new(TableConfig::fixed(10));
        presenter.attach(spec).unwrap();

        let view = presenter.present();
        let sort = view.sort.unwrap();
        assert_eq!(sort.direction, SortDirection::Ascending);
        assert_eq!(view.headers[0].sort_direction, Some(SortDirection::Ascending));
    }

    #[test]
    fn test_selection_survives_sorting() {
        let mut presenter = Presenter::new(TableConfig::fixed(25))
            .with_selection(SelectionTracker::new(Box::new(|_| {})));
        presenter.attach(spec_23_rows()).unwrap();

        presenter.select(Some(3)); // original index of the 9
        presenter.toggle_sort(0); // desc moves it near the top

        let view = presenter.present();
        assert!(view.selectable);
        assert_eq!(presenter.selected(), Some(3));
        let selected_row = view.rows.iter().find(|r| r.selected).unwrap();
        assert_eq!(selected_row.original_index, 3);
        assert_eq!(selected_row.cells, vec!["9".to_string()]);
    }

    #[test]
    fn test_selection_disabled_without_tracker() {
        let mut presenter = Presenter::new(TableConfig::fixed(10));
        presenter.attach(spec_23_rows()).unwrap();
        presenter.select(Some(3));
        assert_eq!(presenter.selected(), None);
        assert!(!presenter.present().selectable);
    }

    #[test]
    fn test_selection_callback_fires() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let mut presenter = Presenter::new(TableConfig::fixed(10)).with_selection(
            SelectionTracker::new(Box::new(move |index| sink.borrow_mut().push(index))),
        );
        presenter.attach(spec_23_rows()).unwrap();

        presenter.select(Some(7));
        presenter.select(None);
        assert_eq!(*log.borrow(), vec![Some(7), None]);
    }

    #[test]
    fn test_auto_page_size_two_phase() {
        let mut presenter = Presenter::new(TableConfig::auto());
        presenter.attach(spec_23_rows()).unwrap();

        // First render uses the provisional default: everything fits on
        // one 25-row page.
        let view = presenter.present();
        assert_eq!(view.page_count, 1);
        assert_eq!(view.rows.len(), 23);

        // The collaborator measures the committed layout; 10 rows fit.
        presenter.observe_page_metrics(PageMeasurement {
            available_height: 340.0,
            header_height: 40.0,
            min_row_height: 30.0,
        });
        let view = presenter.present();
        assert_eq!(view.rows.len(), 10);
        assert_eq!(view.page_count, 3);

        // Re-attaching (new spec identity) forgets the measurement.
        presenter.attach(spec_23_rows()).unwrap();
        assert_eq!(presenter.present().page_count, 1);
    }

    #[test]
    fn test_prev_after_page_size_lock_shrinks_page_count() {
        // 100 rows in auto mode: 4 pages at the provisional size of 25.
        let spec = TableSpec::new(vec![int_column("n", (0..100).collect())], 100);
        let mut presenter = Presenter::new(TableConfig::auto());
        presenter.attach(spec).unwrap();

        presenter.page_last();
        assert_eq!(presenter.present().current_page, 4);

        // Measurement locks 50 rows per page: now only 2 pages, and the
        // stored page 4 clamps to 2 on read.
        presenter.observe_page_metrics(PageMeasurement {
            available_height: 1540.0,
            header_height: 40.0,
            min_row_height: 30.0,
        });
        assert_eq!(presenter.present().current_page, 2);

        // Backward navigation moves from the clamped page, not the stale one.
        presenter.page_prev();
        assert_eq!(presenter.present().current_page, 1);
    }

    #[test]
    fn test_fixed_mode_ignores_measurements() {
        let mut presenter = Presenter::new(TableConfig::fixed(10));
        presenter.attach(spec_23_rows()).unwrap();
        presenter.observe_page_metrics(PageMeasurement {
            available_height: 10_000.0,
            header_height: 0.0,
            min_row_height: 10.0,
        });
        assert_eq!(presenter.present().rows.len(), 10);
    }

    #[test]
    fn test_keyboard_paging_operations() {
        let mut presenter = Presenter::new(TableConfig::fixed(10));
        presenter.attach(spec_23_rows()).unwrap();

        presenter.page_next();
        assert_eq!(presenter.present().current_page, 2);
        presenter.page_last();
        assert_eq!(presenter.present().current_page, 3);
        presenter.page_next();
        assert_eq!(presenter.present().current_page, 3);
        presenter.page_prev();
        assert_eq!(presenter.present().current_page, 2);
        presenter.page_first();
        assert_eq!(presenter.present().current_page, 1);
        presenter.page_prev();
        assert_eq!(presenter.present().current_page, 1);
    }

    #[test]
    fn test_column_groups_collapse_to_one_cell() {
        let first = ColumnSpec::new("first", "first", Box::new(|i| {
            CellValue::from(["Ada", "Grace"][i])
        }));
        let last = ColumnSpec::new("last", "last", Box::new(|i| {
            CellValue::from(["Lovelace", "Hopper"][i])
        }));
        let age = int_column("age", vec![36, 85]);
        let spec = TableSpec::new(vec![first, last, age], 2).with_column_groups(vec![
            ColumnGroup::new("name", vec![0, 1]),
            ColumnGroup::new("age", vec![2]),
        ]);

        let mut presenter = Presenter::new(TableConfig::fixed(10));
        presenter.attach(spec).unwrap();
        let view = presenter.present();

        assert_eq!(view.headers.len(), 2);
        assert_eq!(view.headers[0].key, "name");
        // Multi-column group: not sortable. Single-column group: sortable.
        assert!(!view.headers[0].sortable());
        assert_eq!(view.headers[1].sort_column, Some(2));

        assert_eq!(view.rows[0].cells, vec!["Ada Lovelace".to_string(), "36".to_string()]);
        assert_eq!(view.rows[1].cells, vec!["Grace Hopper".to_string(), "85".to_string()]);
    }

    #[test]
    fn test_custom_group_renderer() {
        let a = int_column("a", vec![1, 2]);
        let b = int_column("b", vec![10, 20]);
        let group = ColumnGroup::new("ratio", vec![0, 1]).with_render(Box::new(
            |values: &[CellValue], _columns: &[&ColumnSpec]| {
                format!(
                    "{}/{}",
                    values[0].display(),
                    values[1].display()
                )
            },
        ));
        let spec = TableSpec::new(vec![a, b], 2).with_column_groups(vec![group]);

        let mut presenter = Presenter::new(TableConfig::fixed(10));
        presenter.attach(spec).unwrap();
        let view = presenter.present();
        assert_eq!(view.rows[0].cells, vec!["1/10".to_string()]);
        assert_eq!(view.rows[1].cells, vec!["2/20".to_string()]);
    }

    #[test]
    fn test_zero_rows() {
        let spec = TableSpec::new(vec![int_column("n", Vec::new())], 0);
        let mut presenter = Presenter::new(TableConfig::fixed(10));
        presenter.attach(spec).unwrap();

        let view = presenter.present();
        assert_eq!(view.page_count, 1);
        assert!(view.rows.is_empty());
        assert_eq!(view.headers.len(), 1);
    }

    #[test]
    #[should_panic(expected = "page_size must be at least 1")]
    fn test_zero_fixed_page_size_panics() {
        TableConfig::fixed(0);
    }
}
