//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the line that was filled longest ago, regardless of how
//! recently it was hit. It operates as a ring buffer over every line of the store:
//! each fill advances the cursor by one, wrapping to line 0. Hits never move it.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_fill()`: O(1)
//!   - `victim()`: O(1)
//! - **Space Complexity:** O(1)
//! - **Hardware Cost:** Minimal - a single counter per store

use super::ReplacementPolicy;
use crate::common::addr::Decomposed;

/// FIFO policy state.
#[derive(Debug, Clone)]
pub struct FifoPolicy {
    /// Next line to be evicted.
    next: usize,
    /// Number of lines in the store.
    lines: usize,
}

impl FifoPolicy {
    /// Creates a new FIFO policy for a store of `lines` lines, pointing at line 0.
    pub const fn new(lines: usize) -> Self {
        debug_assert!(lines > 0, "FIFO policy needs at least one line");
        Self {
            next: 0,
            lines,
        }
    }

    /// Returns the line the next miss will overwrite.
    #[inline]
    pub const fn cursor(&self) -> usize {
        self.next
    }
}

impl ReplacementPolicy for FifoPolicy {
    /// Returns the current ring-buffer cursor.
    fn victim(&mut self, _fields: Decomposed) -> usize {
        self.next
    }

    /// Advances the cursor past the line just filled.
    fn on_fill(&mut self, slot: usize) {
        self.next = (slot + 1) % self.lines;
    }
}
