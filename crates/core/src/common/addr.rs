//! Addresses and Address Decomposition.
//!
//! This module defines the simulated address type and the split of an address into
//! cache fields. It provides the following:
//! 1. **Type Safety:** A strong `Addr` type for the fixed-width simulated address space.
//! 2. **Field Layout:** `AddressLayout`, the tag | index | offset partition of an address.
//! 3. **Decomposition:** Shift-and-mask extraction of tag and index from an address.

use serde::Serialize;

use super::constants::ADDRESS_BITS;
use super::error::ConfigError;

/// A byte address in the simulated address space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Addr(pub u32);

impl Addr {
    /// Creates a new address from a raw value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }
}

impl From<u32> for Addr {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

/// Tag and index fields extracted from an address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decomposed {
    /// High-order bits identifying the block.
    pub tag: u32,
    /// Middle bits selecting a line; always 0 when the layout has no index field.
    pub index: u32,
}

/// Partition of an address into tag, index and offset fields.
///
/// The fields are laid out most-significant first as `tag | index | offset`
/// and always sum to [`ADDRESS_BITS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AddressLayout {
    tag_bits: u32,
    index_bits: u32,
    offset_bits: u32,
}

/// Mask covering the low `bits` bits of an address.
const fn low_mask(bits: u32) -> u32 {
    if bits == 0 {
        0
    } else {
        u32::MAX >> (ADDRESS_BITS - bits)
    }
}

impl AddressLayout {
    /// Builds a layout from offset and index widths; the tag takes the remaining bits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FieldWidthOverflow`] if `offset_bits + index_bits`
    /// exceeds the address width.
    pub fn new(offset_bits: u32, index_bits: u32) -> Result<Self, ConfigError> {
        let needed = offset_bits.saturating_add(index_bits);
        if needed > ADDRESS_BITS {
            return Err(ConfigError::FieldWidthOverflow {
                needed,
                available: ADDRESS_BITS,
            });
        }
        Ok(Self {
            tag_bits: ADDRESS_BITS - needed,
            index_bits,
            offset_bits,
        })
    }

    /// Width of the tag field.
    #[inline]
    pub const fn tag_bits(&self) -> u32 {
        self.tag_bits
    }

    /// Width of the index field.
    #[inline]
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of the byte-offset field.
    #[inline]
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Splits an address into its tag and index fields.
    ///
    /// Offset bits are discarded; no byte-level data is modeled.
    #[inline]
    pub const fn decompose(&self, addr: Addr) -> Decomposed {
        let raw = addr.val();
        let index = match raw.checked_shr(self.offset_bits) {
            Some(v) => v & low_mask(self.index_bits),
            None => 0,
        };
        let tag = match raw.checked_shr(self.offset_bits + self.index_bits) {
            Some(v) => v,
            None => 0,
        };
        Decomposed { tag, index }
    }

    /// Rebuilds the block-aligned address that `fields` were extracted from.
    ///
    /// The offset field of the result is zero.
    pub const fn compose(&self, fields: Decomposed) -> Addr {
        let tag = match fields.tag.checked_shl(self.offset_bits + self.index_bits) {
            Some(v) => v,
            None => 0,
        };
        let index = match (fields.index & low_mask(self.index_bits)).checked_shl(self.offset_bits) {
            Some(v) => v,
            None => 0,
        };
        Addr::new(tag | index)
    }
}
