//! Cache Store.
//!
//! This module implements a tag-only cache store. It supports direct-mapped
//! placement and fully-associative placement with FIFO eviction. Only tags are
//! tracked; no data payload is modeled, so the store answers hit or miss and
//! nothing else.

/// Geometry derivation (block count and address layout).
pub mod geometry;

/// Victim selection policies (direct-mapped, FIFO).
pub mod policies;

pub use self::geometry::CacheGeometry;

use tracing::trace;

use self::policies::{DirectMappedPolicy, FifoPolicy, ReplacementPolicy};
use crate::common::addr::Decomposed;
use crate::config::Mapping;

/// One tag slot. A line that has never been filled holds no tag and cannot hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    tag: Option<u32>,
}

impl CacheLine {
    /// Tag currently held, or `None` for a never-filled line.
    #[inline]
    pub const fn tag(&self) -> Option<u32> {
        self.tag
    }

    /// Returns `true` once the line has been filled.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.tag.is_some()
    }

    #[inline]
    fn holds(&self, tag: u32) -> bool {
        self.tag == Some(tag)
    }
}

/// Result of presenting one access to a store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The tag was resident; the store is unchanged.
    Hit,
    /// The tag was absent and has been installed.
    Miss {
        /// Tag displaced from the filled line, if that line was valid.
        evicted: Option<u32>,
    },
}

impl AccessOutcome {
    /// Returns `true` for [`AccessOutcome::Hit`].
    #[inline]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

/// A fixed-capacity collection of tag slots.
///
/// Allocated once with every line empty and mutated in place; never resized.
#[derive(Debug)]
pub struct CacheStore {
    lines: Vec<CacheLine>,
    mapping: Mapping,
    placement: Placement,
}

/// Concrete policy kept alongside the store so lookups can reuse its slot rule.
#[derive(Debug)]
enum Placement {
    Direct(DirectMappedPolicy),
    Fifo(FifoPolicy),
}

impl Placement {
    fn policy(&mut self) -> &mut dyn ReplacementPolicy {
        match self {
            Self::Direct(p) => p,
            Self::Fifo(p) => p,
        }
    }
}

impl CacheStore {
    /// Creates a store of `block_count` empty lines using `mapping` placement.
    ///
    /// `block_count` must be non-zero; [`CacheGeometry::new`] never derives an
    /// empty store.
    pub fn new(block_count: usize, mapping: Mapping) -> Self {
        debug_assert!(block_count > 0, "cache store needs at least one line");
        let placement = match mapping {
            Mapping::DirectMapped => Placement::Direct(DirectMappedPolicy::new(block_count)),
            Mapping::FullyAssociative => Placement::Fifo(FifoPolicy::new(block_count)),
        };
        Self {
            lines: vec![CacheLine::default(); block_count],
            mapping,
            placement,
        }
    }

    /// Returns the line holding `fields.tag`, if any, without modifying the store.
    ///
    /// Direct-mapped stores inspect only the indexed line; fully-associative
    /// stores scan every line.
    pub fn lookup(&self, fields: Decomposed) -> Option<usize> {
        match &self.placement {
            Placement::Direct(policy) => {
                let slot = policy.slot(fields);
                self.lines[slot].holds(fields.tag).then_some(slot)
            }
            Placement::Fifo(_) => self.lines.iter().position(|line| line.holds(fields.tag)),
        }
    }

    /// Looks up `fields` and installs the tag on a miss.
    ///
    /// A hit leaves the store untouched. A miss overwrites the line chosen by the
    /// placement policy and reports the tag it displaced.
    pub fn access(&mut self, fields: Decomposed) -> AccessOutcome {
        if self.lookup(fields).is_some() {
            return AccessOutcome::Hit;
        }

        let policy = self.placement.policy();
        let slot = policy.victim(fields);
        policy.on_fill(slot);

        let evicted = self.lines[slot].tag.replace(fields.tag);
        if let Some(old) = evicted {
            trace!(slot, old_tag = old, new_tag = fields.tag, "evicted line");
        }
        AccessOutcome::Miss { evicted }
    }

    /// Returns `true` if any line holds `tag`.
    pub fn contains_tag(&self, tag: u32) -> bool {
        self.lines.iter().any(|line| line.holds(tag))
    }

    /// Number of lines that have been filled at least once.
    pub fn occupancy(&self) -> usize {
        self.lines.iter().filter(|line| line.is_valid()).count()
    }

    /// Number of lines in the store.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always `false` for a store built from a valid geometry.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines in slot order.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Placement policy of this store.
    pub const fn mapping(&self) -> Mapping {
        self.mapping
    }

    /// Next line a miss will overwrite, for fully-associative stores.
    pub const fn fifo_cursor(&self) -> Option<usize> {
        match &self.placement {
            Placement::Fifo(policy) => Some(policy.cursor()),
            Placement::Direct(_) => None,
        }
    }
}
