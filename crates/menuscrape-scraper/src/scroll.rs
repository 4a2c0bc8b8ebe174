//! Scroll-Termination Heuristic.
//!
//! After each pass over the visible items the loop scrolls a little,
//! re-queries the items, and reports what it saw here. The item set counts
//! as exhausted when the query comes back empty, and as stalled once the
//! scroll offset has failed to advance for `threshold` consecutive passes.
//!
//! Pages that load items without moving the offset, or that load slower
//! than the pass pause, will terminate early. That is accepted.

/// Why the discovery loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The item query returned nothing.
    Exhausted,
    /// The scroll offset stopped advancing.
    Stalled,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::Exhausted => write!(f, "exhausted"),
            Termination::Stalled => write!(f, "stalled"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    Stop(Termination),
}

#[derive(Debug, Clone)]
pub struct StallDetector {
    threshold: u32,
    no_progress: u32,
    last_offset: f64,
}

impl StallDetector {
    /// `initial_offset` is the scroll position before the first pass.
    #[must_use]
    pub fn new(threshold: u32, initial_offset: f64) -> Self {
        Self {
            threshold: threshold.max(1),
            no_progress: 0,
            last_offset: initial_offset,
        }
    }

    /// Records one pass: how many items the re-query found and the offset
    /// after scrolling.
    pub fn observe(&mut self, items_found: usize, offset: f64) -> Verdict {
        if items_found == 0 {
            return Verdict::Stop(Termination::Exhausted);
        }

        if offset > self.last_offset {
            self.last_offset = offset;
            self.no_progress = 0;
            return Verdict::Continue;
        }

        self.no_progress += 1;
        if self.no_progress >= self.threshold {
            Verdict::Stop(Termination::Stalled)
        } else {
            Verdict::Continue
        }
    }

    #[must_use]
    pub fn no_progress(&self) -> u32 {
        self.no_progress
    }
}
