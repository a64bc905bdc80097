//! FILENAME: table-engine/src/selection.rs
//! PURPOSE: The Selection Tracker — at most one selected row.
//! CONTEXT: Selection is row-identity-based: it stores an index in
//! *unsorted* row space, so a re-sort or page change never moves it. A
//! tracker only exists when the host supplies a change callback; without
//! one, selection is disabled entirely and no state is kept anywhere.

use std::fmt;

/// Notified with the new selection on every change.
pub type SelectionCallback = Box<dyn Fn(Option<usize>)>;

pub struct SelectionTracker {
    selected: Option<usize>,
    on_change: SelectionCallback,
}

impl SelectionTracker {
    pub fn new(on_change: SelectionCallback) -> Self {
        SelectionTracker {
            selected: None,
            on_change,
        }
    }

    /// Pre-seeds the selection without firing the callback.
    pub fn with_selected(mut self, index: usize) -> Self {
        self.selected = Some(index);
        self
    }

    /// The selected row's original (unsorted) index, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Sets or clears the selection and notifies the host.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
        (self.on_change)(index);
    }
}

impl fmt::Debug for SelectionTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionTracker")
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn tracker_with_log() -> (SelectionTracker, Rc<RefCell<Vec<Option<usize>>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let tracker = SelectionTracker::new(Box::new(move |index| {
            sink.borrow_mut().push(index);
        }));
        (tracker, log)
    }

    #[test]
    fn test_select_notifies() {
        let (mut tracker, log) = tracker_with_log();

        tracker.select(Some(4));
        assert_eq!(tracker.selected(), Some(4));
        tracker.select(None);
        assert_eq!(tracker.selected(), None);

        assert_eq!(*log.borrow(), vec![Some(4), None]);
    }

    #[test]
    fn test_preseed_does_not_notify() {
        let (tracker, log) = tracker_with_log();
        let tracker = tracker.with_selected(2);
        assert_eq!(tracker.selected(), Some(2));
        assert!(log.borrow().is_empty());
    }
}
