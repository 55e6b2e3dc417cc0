//! Simulation Driver.
//!
//! Owns the cache store(s) and the statistics for one run, and routes each access
//! to the store selected by the organization:
//!
//! | organization | access kind | store         |
//! |--------------|-------------|---------------|
//! | Unified      | any         | unified       |
//! | Split        | Instruction | instruction   |
//! | Split        | Data        | data          |

use tracing::{info, trace};

use crate::cache::{AccessOutcome, CacheGeometry, CacheStore};
use crate::common::data::{AccessKind, MemoryAccess};
use crate::common::error::{ConfigError, SimError, TraceError};
use crate::config::{Config, Organization};
use crate::stats::{SimReport, SimStats};

/// The store(s) allocated for an organization.
#[derive(Debug)]
enum Stores {
    Unified(CacheStore),
    Split {
        instruction: CacheStore,
        data: CacheStore,
    },
}

/// Trace-driven cache simulator.
#[derive(Debug)]
pub struct Simulator {
    geometry: CacheGeometry,
    stores: Stores,
    stats: SimStats,
}

impl Simulator {
    /// Allocates empty stores for `geometry`.
    pub fn new(geometry: CacheGeometry) -> Self {
        let blocks = geometry.block_count() as usize;
        let mapping = geometry.mapping();
        let stores = match geometry.organization() {
            Organization::Unified => Stores::Unified(CacheStore::new(blocks, mapping)),
            Organization::Split => Stores::Split {
                instruction: CacheStore::new(blocks, mapping),
                data: CacheStore::new(blocks, mapping),
            },
        };
        Self {
            geometry,
            stores,
            stats: SimStats::default(),
        }
    }

    /// Validates `config` and allocates the stores it describes.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Config::geometry`].
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(config.geometry()?))
    }

    /// Simulates a single access and updates the statistics.
    pub fn access(&mut self, access: MemoryAccess) -> AccessOutcome {
        let fields = self.geometry.layout().decompose(access.addr);
        let outcome = self.store_mut(access.kind).access(fields);
        self.stats
            .record(self.geometry.organization(), access.kind, outcome.is_hit());

        trace!(
            kind = %access.kind,
            addr = access.addr.val(),
            tag = fields.tag,
            index = fields.index,
            hit = outcome.is_hit(),
            "access"
        );
        outcome
    }

    /// Simulates every access in `trace` until it ends.
    ///
    /// Statistics gathered before an error remain readable through
    /// [`Simulator::stats`], but a failed run has no meaningful result.
    ///
    /// # Errors
    ///
    /// Returns the first [`TraceError`] produced by `trace`, wrapped in [`SimError`].
    pub fn run<I>(&mut self, trace: I) -> Result<&SimStats, SimError>
    where
        I: IntoIterator<Item = Result<MemoryAccess, TraceError>>,
    {
        for access in trace {
            let _ = self.access(access?);
        }
        info!(
            accesses = self.stats.accesses,
            hits = self.stats.hits,
            "simulation finished"
        );
        Ok(&self.stats)
    }

    /// Statistics gathered so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Geometry of the simulated cache.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Snapshot of the geometry and statistics.
    pub fn report(&self) -> SimReport {
        SimReport::new(self.geometry, self.stats)
    }

    /// Store that services accesses of `kind`.
    pub const fn store(&self, kind: AccessKind) -> &CacheStore {
        match (&self.stores, kind) {
            (Stores::Unified(store), _) => store,
            (Stores::Split { instruction, .. }, AccessKind::Instruction) => instruction,
            (Stores::Split { data, .. }, AccessKind::Data) => data,
        }
    }

    fn store_mut(&mut self, kind: AccessKind) -> &mut CacheStore {
        match (&mut self.stores, kind) {
            (Stores::Unified(store), _) => store,
            (Stores::Split { instruction, .. }, AccessKind::Instruction) => instruction,
            (Stores::Split { data, .. }, AccessKind::Data) => data,
        }
    }
}
