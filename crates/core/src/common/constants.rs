//! Global Simulator Constants.
//!
//! This module defines the fixed parameters shared across the simulator. It includes:
//! 1. **Address Width:** The number of bits in a simulated address.
//! 2. **Reference Geometry:** Default block size and the supported total-size range.
//! 3. **Trace Defaults:** The trace file read when no path is given.

/// Width of a simulated memory address in bits.
///
/// Tag, index and offset fields always sum to this width.
pub const ADDRESS_BITS: u32 = u32::BITS;

/// Default cache block (line) size in bytes.
pub const DEFAULT_BLOCK_BYTES: u32 = 64;

/// Smallest supported total cache size in bytes.
pub const MIN_CACHE_BYTES: u32 = 128;

/// Largest supported total cache size in bytes.
pub const MAX_CACHE_BYTES: u32 = 4096;

/// Trace file consumed when the caller does not name one.
pub const DEFAULT_TRACE_PATH: &str = "mem_trace.txt";
