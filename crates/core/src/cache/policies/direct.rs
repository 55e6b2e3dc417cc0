//! Direct-Mapped Placement.
//!
//! Every block has exactly one candidate line, selected by the index field, so the
//! victim is whatever currently occupies that line.

use super::ReplacementPolicy;
use crate::common::addr::Decomposed;

/// Placement state for a direct-mapped store.
#[derive(Debug, Clone)]
pub struct DirectMappedPolicy {
    lines: usize,
}

impl DirectMappedPolicy {
    /// Creates a policy for a store of `lines` lines.
    pub const fn new(lines: usize) -> Self {
        debug_assert!(lines > 0, "direct-mapped policy needs at least one line");
        Self {
            lines,
        }
    }

    /// Returns the only line `fields` may occupy.
    #[inline]
    pub const fn slot(&self, fields: Decomposed) -> usize {
        fields.index as usize % self.lines
    }
}

impl ReplacementPolicy for DirectMappedPolicy {
    fn victim(&mut self, fields: Decomposed) -> usize {
        self.slot(fields)
    }

    fn on_fill(&mut self, _slot: usize) {}
}
