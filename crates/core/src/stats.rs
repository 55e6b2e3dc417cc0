//! Simulation statistics collection and reporting.
//!
//! This module tracks the outcome of every simulated access. It provides:
//! 1. **Counters:** Total accesses and hits, split by store (unified, instruction, data).
//! 2. **Rates:** Hit rates derived on demand, undefined when nothing was accessed.
//! 3. **Reporting:** The plain-text statistics block and a serializable run report.

use std::io::{self, Write};

use serde::Serialize;

use crate::cache::CacheGeometry;
use crate::common::data::AccessKind;
use crate::config::Organization;

/// Hit/miss counters for a simulation run.
///
/// Every counter only ever increases. `hits` always equals the sum of the
/// per-store hit counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Accesses processed.
    pub accesses: u64,
    /// Hits across all stores.
    pub hits: u64,
    /// Hits in the unified store.
    pub unified_hits: u64,
    /// Hits in the data store of a split cache.
    pub data_hits: u64,
    /// Hits in the instruction store of a split cache.
    pub instruction_hits: u64,
}

/// Divides `part` by `accesses`, or `None` when nothing was accessed.
fn ratio(part: u64, accesses: u64) -> Option<f64> {
    (accesses != 0).then(|| part as f64 / accesses as f64)
}

/// Formats a rate to four places; an undefined rate prints as `nan`.
fn fmt_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| "nan".to_owned(), |r| format!("{r:.4}"))
}

impl SimStats {
    /// Records one access serviced by the store selected for `kind` under `organization`.
    pub fn record(&mut self, organization: Organization, kind: AccessKind, hit: bool) {
        self.accesses += 1;
        if !hit {
            return;
        }
        self.hits += 1;
        match (organization, kind) {
            (Organization::Unified, _) => self.unified_hits += 1,
            (Organization::Split, AccessKind::Data) => self.data_hits += 1,
            (Organization::Split, AccessKind::Instruction) => self.instruction_hits += 1,
        }
        debug_assert_eq!(
            self.hits,
            self.unified_hits + self.data_hits + self.instruction_hits
        );
    }

    /// Accesses that missed.
    pub const fn misses(&self) -> u64 {
        self.accesses - self.hits
    }

    /// Fraction of all accesses that hit.
    pub fn hit_rate(&self) -> Option<f64> {
        ratio(self.hits, self.accesses)
    }

    /// Data-store hits as a fraction of *all* accesses, not of data accesses.
    pub fn data_hit_rate(&self) -> Option<f64> {
        ratio(self.data_hits, self.accesses)
    }

    /// Instruction-store hits as a fraction of *all* accesses.
    pub fn instruction_hit_rate(&self) -> Option<f64> {
        ratio(self.instruction_hits, self.accesses)
    }

    /// Writes the statistics block for a cache of the given organization.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn write_report<W: Write>(&self, out: &mut W, organization: Organization) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Cache Statistics")?;
        writeln!(out, "-----------------")?;
        writeln!(out)?;
        writeln!(out, "Accesses: {}", self.accesses)?;
        writeln!(out, "Hits:     {}", self.hits)?;
        writeln!(out, "Hit Rate: {}", fmt_rate(self.hit_rate()))?;

        match organization {
            Organization::Unified => {
                writeln!(out, "Unified Hits: {}", self.unified_hits)?;
            }
            Organization::Split => {
                writeln!(out, "Total hits:     {}", self.hits)?;
                writeln!(out, "Total hit rate: {}", fmt_rate(self.hit_rate()))?;
                writeln!(out)?;
                writeln!(out, "Data Hits:     {}", self.data_hits)?;
                writeln!(
                    out,
                    "Data Hit Rate of total accesses: {}",
                    fmt_rate(self.data_hit_rate())
                )?;
                writeln!(out, "Instruction Hits:     {}", self.instruction_hits)?;
                writeln!(
                    out,
                    "Instruction Hit Rate of total accesses: {}",
                    fmt_rate(self.instruction_hit_rate())
                )?;
            }
        }
        Ok(())
    }

    /// Prints the statistics block to stdout.
    ///
    /// # Errors
    ///
    /// Returns any error writing to stdout.
    pub fn print(&self, organization: Organization) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_report(&mut lock, organization)?;
        lock.flush()
    }
}

/// End-of-run snapshot pairing the geometry with its statistics.
///
/// Serializes to the JSON emitted by `cachesim --json`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SimReport {
    /// Cache shape that produced the statistics.
    pub geometry: CacheGeometry,
    /// Raw counters.
    pub stats: SimStats,
    /// Overall hit rate, `null` when no access was made.
    pub hit_rate: Option<f64>,
    /// Data-store hit rate relative to all accesses.
    pub data_hit_rate: Option<f64>,
    /// Instruction-store hit rate relative to all accesses.
    pub instruction_hit_rate: Option<f64>,
}

impl SimReport {
    /// Builds a report from a finished run.
    pub fn new(geometry: CacheGeometry, stats: SimStats) -> Self {
        Self {
            geometry,
            stats,
            hit_rate: stats.hit_rate(),
            data_hit_rate: stats.data_hit_rate(),
            instruction_hit_rate: stats.instruction_hit_rate(),
        }
    }
}
