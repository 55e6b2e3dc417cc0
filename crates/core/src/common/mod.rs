//! Common types shared throughout the cache simulator.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Addresses:** The simulated address type and its tag/index/offset decomposition.
//! 2. **Constants:** Address width and reference-geometry defaults.
//! 3. **Memory Access:** Trace records and their instruction/data classification.
//! 4. **Error Handling:** Configuration, trace and simulation error types.

/// Address type and address-field decomposition.
pub mod addr;

/// Simulator-wide constants.
pub mod constants;

/// Memory access record definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{Addr, AddressLayout, Decomposed};
pub use constants::{ADDRESS_BITS, DEFAULT_BLOCK_BYTES};
pub use data::{AccessKind, MemoryAccess};
pub use error::{ConfigError, SimError, TraceError, UnknownAccessKind};
