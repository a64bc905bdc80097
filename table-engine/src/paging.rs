//! FILENAME: table-engine/src/paging.rs
//! PURPOSE: The Paging Engine — page count, page window, and navigation.
//! CONTEXT: Paging is derived data: given a row count, a page size and a
//! 1-based current page, the window function yields the visible `[start,
//! end)` slice. The current page is clamped on every read, so a page that
//! went stale after the data shrank silently corrects itself. Navigation
//! never rejects input; out-of-range targets clamp.

use log::trace;
use serde::{Deserialize, Serialize};

/// Number of pages for the given row count: `max(1, ceil(row_count /
/// page_size))`. Zero rows still form one (empty) page so paging controls
/// always have a valid page to show.
///
/// # Panics
/// Panics if `page_size < 1` — a contract violation by the caller.
pub fn page_count(row_count: usize, page_size: usize) -> usize {
    assert!(page_size >= 1, "page_size must be at least 1");
    ((row_count + page_size - 1) / page_size).max(1)
}

/// The visible slice of the row permutation for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// First visible permutation index (inclusive).
    pub start: usize,

    /// One past the last visible permutation index.
    pub end: usize,

    /// Total number of pages.
    pub page_count: usize,

    /// The clamped 1-based current page.
    pub current_page: usize,
}

/// Computes the page window. `current_page` is clamped into
/// `[1, page_count]` before the slice bounds are derived.
pub fn page_window(row_count: usize, page_size: usize, current_page: usize) -> PageWindow {
    let pages = page_count(row_count, page_size);
    let current = current_page.clamp(1, pages);
    let start = page_size * (current - 1);
    let end = (start + page_size).min(row_count);
    PageWindow {
        start,
        end,
        page_count: pages,
        current_page: current,
    }
}

/// Per-table paging state: just the 1-based current page. Reset to page 1
/// when the spec identity changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingState {
    current_page: usize,
}

impl PagingState {
    pub fn new() -> Self {
        PagingState { current_page: 1 }
    }

    /// The stored page. May be stale relative to the current page count;
    /// `page_window` clamps on read.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Back to page 1 (spec identity change).
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn first(&mut self) {
        self.current_page = 1;
    }

    /// Moves back one page. The stored page may be stale above the current
    /// page count (the data shrank, or a locked page size grew); clamping
    /// before the decrement keeps the result in `[1, page_count]`.
    pub fn prev(&mut self, page_count: usize) {
        self.current_page = self.current_page.min(page_count).saturating_sub(1).max(1);
    }

    pub fn next(&mut self, page_count: usize) {
        self.current_page = (self.current_page + 1).min(page_count);
    }

    pub fn last(&mut self, page_count: usize) {
        self.current_page = page_count;
    }

    /// Jumps to an arbitrary page, e.g. one typed by a user. Silently
    /// clamps instead of rejecting.
    pub fn set(&mut self, page: i64, page_count: usize) {
        self.current_page = page.clamp(1, page_count as i64) as usize;
        trace!("page set to {}", self.current_page);
    }
}

impl Default for PagingState {
    fn default() -> Self {
        PagingState::new()
    }
}
