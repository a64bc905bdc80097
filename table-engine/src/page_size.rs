//! FILENAME: table-engine/src/page_size.rs
//! PURPOSE: The Dynamic Page-Size Estimator — "fill the available space" paging.
//! CONTEXT: When the host asks for auto paging the engine cannot know how
//! many rows fit until one page has actually been laid out. The first render
//! uses a provisional size; after layout the collaborator reports the
//! measured heights and the estimator locks the computed size for the rest
//! of the spec's lifetime. The first page differs from the final one only in
//! how many trailing rows it includes, never in content or order.

use log::debug;
use serde::{Deserialize, Serialize};

/// Host paging configuration: a fixed row count per page, or measure-once
/// automatic sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSizeMode {
    Fixed(usize),
    Auto,
}

/// Page size used for the first render in `Auto` mode, before any
/// measurement exists.
pub const DEFAULT_PROVISIONAL_PAGE_SIZE: usize = 25;

/// Heights reported by the rendering collaborator after a committed layout
/// pass, in whatever consistent length unit the host uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMeasurement {
    /// Total height available for the table body.
    pub available_height: f64,

    /// Height of the header row.
    pub header_height: f64,

    /// Minimum height among the rendered rows. The minimum, not the
    /// average: a long label wrapping to two lines must not halve the
    /// estimate.
    pub min_row_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum Phase {
    Provisional,
    Locked(usize),
}

/// Two-phase page-size estimator: provisional until the first valid
/// measurement, then locked until `reset` (spec identity change).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizeEstimator {
    provisional: usize,
    phase: Phase,
}

impl PageSizeEstimator {
    pub fn new() -> Self {
        Self::with_provisional(DEFAULT_PROVISIONAL_PAGE_SIZE)
    }

    /// # Panics
    /// Panics if `provisional < 1`.
    pub fn with_provisional(provisional: usize) -> Self {
        assert!(provisional >= 1, "provisional page size must be at least 1");
        PageSizeEstimator {
            provisional,
            phase: Phase::Provisional,
        }
    }

    /// The effective page size for the next render.
    pub fn page_size(&self) -> usize {
        match self.phase {
            Phase::Provisional => self.provisional,
            Phase::Locked(size) => size,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.phase, Phase::Locked(_))
    }

    /// Feeds one post-layout measurement. The first valid measurement locks
    /// `floor((available - header) / min_row_height)`, floored at one row.
    /// An unusable measurement (no rendered rows, zero or non-finite
    /// heights) is "not yet known" — the provisional size stays and a later
    /// render may try again. Measurements after locking are ignored.
    pub fn observe(&mut self, m: PageMeasurement) {
        if self.is_locked() {
            return;
        }
        if !(m.min_row_height > 0.0)
            || !m.available_height.is_finite()
            || !m.header_height.is_finite()
        {
            return;
        }

        let fit = ((m.available_height - m.header_height) / m.min_row_height).floor();
        let size = if fit >= 1.0 { fit as usize } else { 1 };
        self.phase = Phase::Locked(size);
        debug!("page size locked at {} rows", size);
    }

    /// Back to the provisional phase (spec identity change).
    pub fn reset(&mut self) {
        self.phase = Phase::Provisional;
    }
}

impl Default for PageSizeEstimator {
    fn default() -> Self {
        PageSizeEstimator::new()
    }
}
