//! # Whole-Run Scenarios
//!
//! Small traces with hand-computed outcomes, run end to end through
//! configuration, geometry, the driver and (for file runs) the trace reader.

use cachesim_core::common::error::{ConfigError, SimError, TraceError};
use cachesim_core::common::MemoryAccess;
use cachesim_core::config::{Config, Mapping, Organization};
use cachesim_core::sim::simulate_file;
use cachesim_core::Simulator;

use crate::common::harness::{init_tracing, replay, temp_file};

use MemoryAccess as A;

fn sim(config: &Config) -> Simulator {
    init_tracing();
    Simulator::from_config(config).unwrap()
}

/// 128-byte direct-mapped unified cache: D 0x00, D 0x00, I 0x40 → miss, hit, miss.
#[test]
fn direct_mapped_unified_128() {
    let mut sim = sim(&Config::new(128, Mapping::DirectMapped, Organization::Unified));
    let outcomes = replay(&mut sim, &[A::data(0x00), A::data(0x00), A::instruction(0x40)]);
    assert_eq!(outcomes, [false, true, false]);
    assert_eq!(sim.stats().accesses, 3);
    assert_eq!(sim.stats().hits, 1);
    assert_eq!(sim.stats().unified_hits, 1);
}

/// 256-byte fully-associative unified cache (4 lines): five distinct blocks, then
/// a repeat of the second one, which is still resident.
#[test]
fn fully_associative_unified_256() {
    let mut sim = sim(&Config::new(256, Mapping::FullyAssociative, Organization::Unified));
    assert_eq!(sim.geometry().block_count(), 4);

    let blocks = [0x000, 0x040, 0x080, 0x0C0, 0x100].map(A::data);
    assert_eq!(replay(&mut sim, &blocks), [false; 5]);
    assert!(sim.access(A::data(0x040)).is_hit());
    assert!(!sim.access(A::data(0x000)).is_hit());
    assert_eq!(sim.stats().accesses, 7);
    assert_eq!(sim.stats().hits, 1);
}

/// A loop over a working set that fits hits on every pass after the first.
#[test]
fn looping_working_set_fits() {
    let mut sim = sim(&Config::new(1024, Mapping::DirectMapped, Organization::Unified));
    let pass: Vec<_> = (0..16u32).map(|i| A::instruction(0x4000 + i * 64)).collect();
    for _ in 0..4 {
        let _ = replay(&mut sim, &pass);
    }
    assert_eq!(sim.stats().accesses, 64);
    assert_eq!(sim.stats().hits, 48);
}

/// Cycling through one block more than a FIFO cache holds misses on every access.
#[test]
fn fifo_thrashes_on_oversized_loop() {
    let mut sim = sim(&Config::new(256, Mapping::FullyAssociative, Organization::Unified));
    let pass: Vec<_> = (0..5u32).map(|i| A::data(i * 64)).collect();
    for _ in 0..3 {
        let _ = replay(&mut sim, &pass);
    }
    assert_eq!(sim.stats().hits, 0);
}

#[test]
fn split_file_run() {
    let trace = temp_file(
        "I 0\n\
         D 1000\n\
         I 4\n\
         D 1008\n\
         I 40\n\
         D 2000\n\
         I 0\n",
    );
    let config = Config::new(256, Mapping::DirectMapped, Organization::Split);
    let report = simulate_file(&config, trace.path()).unwrap();

    // Instruction store: 0 miss, 4 hit, 40 miss, 0 hit.
    // Data store (2 lines): 1000 miss, 1008 hit, 2000 miss (same index, evicts 1000).
    assert_eq!(report.stats.accesses, 7);
    assert_eq!(report.stats.instruction_hits, 2);
    assert_eq!(report.stats.data_hits, 1);
    assert_eq!(report.stats.hits, 3);
    assert_eq!(report.data_hit_rate, Some(1.0 / 7.0));
}

#[test]
fn invalid_config_fails_before_trace_is_opened() {
    let config = Config::new(1000, Mapping::DirectMapped, Organization::Unified);
    let err = simulate_file(&config, "does/not/exist.txt").unwrap_err();
    assert!(matches!(err, SimError::Config(ConfigError::NotPowerOfTwo { .. })));
}

#[test]
fn malformed_trace_aborts_run() {
    let trace = temp_file("I 0\nD 40\nQ 80\n");
    let config = Config::new(256, Mapping::DirectMapped, Organization::Unified);
    let err = simulate_file(&config, trace.path()).unwrap_err();
    assert!(matches!(
        err,
        SimError::Trace(TraceError::UnknownAccessType { line: 3, .. })
    ));
}
