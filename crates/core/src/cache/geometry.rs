//! Cache Geometry.
//!
//! Derives the per-store block count and the tag/index/offset address layout from a
//! total size, block size, mapping and organization, rejecting any combination whose
//! log2-based field split would not be exact.

use std::io::{self, Write};

use serde::Serialize;
use tracing::debug;

use crate::common::addr::AddressLayout;
use crate::common::constants::ADDRESS_BITS;
use crate::common::error::ConfigError;
use crate::config::{Mapping, Organization};

/// Validated, immutable shape of the simulated cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CacheGeometry {
    size_bytes: u32,
    block_bytes: u32,
    mapping: Mapping,
    organization: Organization,
    block_count: u32,
    layout: AddressLayout,
}

/// Checks that `value` is a non-zero power of two.
fn require_power_of_two(field: &'static str, value: u32) -> Result<u32, ConfigError> {
    if value.is_power_of_two() {
        Ok(value)
    } else {
        Err(ConfigError::NotPowerOfTwo { field, value })
    }
}

impl CacheGeometry {
    /// Derives the geometry for a cache of `size_bytes` total capacity.
    ///
    /// For a split organization each store receives half the capacity. Under
    /// fully-associative mapping the index field is empty and the tag absorbs it.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotPowerOfTwo`] if either size is zero or not a power of two.
    /// - [`ConfigError::BlockLargerThanStore`] if one block exceeds a store's capacity.
    /// - [`ConfigError::FieldWidthOverflow`] if offset and index exceed the address width.
    pub fn new(
        size_bytes: u32,
        block_bytes: u32,
        mapping: Mapping,
        organization: Organization,
    ) -> Result<Self, ConfigError> {
        let size_bytes = require_power_of_two("cache size", size_bytes)?;
        let block_bytes = require_power_of_two("block size", block_bytes)?;

        let store_bytes = size_bytes / organization.store_count();
        if block_bytes > store_bytes {
            return Err(ConfigError::BlockLargerThanStore {
                block_bytes,
                store_bytes,
            });
        }
        let block_count = store_bytes / block_bytes;

        let offset_bits = block_bytes.trailing_zeros();
        let index_bits = match mapping {
            Mapping::DirectMapped => block_count.trailing_zeros(),
            Mapping::FullyAssociative => 0,
        };
        let layout = AddressLayout::new(offset_bits, index_bits)?;

        debug!(
            size_bytes,
            block_bytes,
            %mapping,
            %organization,
            block_count,
            tag_bits = layout.tag_bits(),
            index_bits,
            offset_bits,
            "derived cache geometry"
        );

        Ok(Self {
            size_bytes,
            block_bytes,
            mapping,
            organization,
            block_count,
            layout,
        })
    }

    /// Total capacity in bytes across all stores.
    pub const fn size_bytes(&self) -> u32 {
        self.size_bytes
    }

    /// Block size in bytes.
    pub const fn block_bytes(&self) -> u32 {
        self.block_bytes
    }

    /// Placement policy.
    pub const fn mapping(&self) -> Mapping {
        self.mapping
    }

    /// Unified or split organization.
    pub const fn organization(&self) -> Organization {
        self.organization
    }

    /// Number of lines in each store.
    pub const fn block_count(&self) -> u32 {
        self.block_count
    }

    /// Number of stores the organization allocates.
    pub const fn store_count(&self) -> u32 {
        self.organization.store_count()
    }

    /// Tag/index/offset partition of an address.
    pub const fn layout(&self) -> AddressLayout {
        self.layout
    }

    /// Writes the human-readable geometry header shown before a run.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(
            out,
            "Input: size = {}, mapping = {}, Org = {}",
            self.size_bytes, self.mapping, self.organization
        )?;
        writeln!(out, "Number of blocks: {}", self.block_count)?;
        writeln!(
            out,
            "Tag ({}) + index ({}) + offset ({}) = {} bits of address",
            self.layout.tag_bits(),
            self.layout.index_bits(),
            self.layout.offset_bits(),
            ADDRESS_BITS
        )
    }
}
