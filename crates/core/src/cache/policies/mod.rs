//! Victim Selection Policies.
//!
//! Decides which line of a store receives a block on a miss.
//!
//! # Policies
//!
//! - `DirectMapped`: the line named by the index field; no bookkeeping.
//! - `Fifo`: round-robin cursor over all lines, advanced on every fill.

use std::fmt;

use crate::common::addr::Decomposed;

/// Direct-mapped placement.
pub mod direct;

/// First-In, First-Out replacement.
pub mod fifo;

pub use direct::DirectMappedPolicy;
pub use fifo::FifoPolicy;

/// Trait for cache victim selection.
pub trait ReplacementPolicy: fmt::Debug + Send + Sync {
    /// Selects the line that will receive the block described by `fields`.
    fn victim(&mut self, fields: Decomposed) -> usize;

    /// Records that `slot` has just been filled.
    fn on_fill(&mut self, slot: usize);
}
