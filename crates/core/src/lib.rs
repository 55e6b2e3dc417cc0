//! Trace-driven CPU cache simulator library.
//!
//! This crate estimates cache hit rates by replaying a memory trace against a
//! tag-only cache model:
//! 1. **Common:** Addresses, tag/index/offset decomposition, access records, errors.
//! 2. **Configuration:** Cache size, block size, mapping and organization, loaded from CLI values or JSON.
//! 3. **Cache:** Geometry derivation and fixed-capacity stores with direct-mapped or FIFO placement.
//! 4. **Simulation:** Trace reader and the driver that routes accesses to unified or split stores.
//! 5. **Statistics:** Hit counters, derived rates and report output.
//!
//! # Examples
//!
//! ```
//! use cachesim_core::common::MemoryAccess;
//! use cachesim_core::config::{Config, Mapping, Organization};
//! use cachesim_core::Simulator;
//!
//! let config = Config::new(128, Mapping::DirectMapped, Organization::Unified);
//! let mut sim = Simulator::from_config(&config).unwrap();
//!
//! assert!(!sim.access(MemoryAccess::data(0x00)).is_hit());
//! assert!(sim.access(MemoryAccess::data(0x00)).is_hit());
//! assert!(!sim.access(MemoryAccess::instruction(0x40)).is_hit());
//! assert_eq!(sim.stats().accesses, 3);
//! assert_eq!(sim.stats().hits, 1);
//! ```

/// Cache geometry, stores and replacement policies.
pub mod cache;
/// Common types and constants (addresses, access records, errors).
pub mod common;
/// Simulator configuration (defaults, mapping and organization enums).
pub mod config;
/// Trace reader and simulation driver.
pub mod sim;
/// Statistics collection and reporting.
pub mod stats;

/// Validated cache shape; obtain one from [`Config::geometry`].
pub use crate::cache::CacheGeometry;
/// Root configuration type; use `Config::new`, `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Trace-driven simulator; construct with `Simulator::from_config`.
pub use crate::sim::Simulator;
/// End-of-run snapshot of geometry, counters and rates.
pub use crate::stats::SimReport;
/// Hit/miss counters for a run.
pub use crate::stats::SimStats;
