//! # Simulation Driver Tests
//!
//! Verifies store routing for each organization, statistics updates per
//! access, split-store independence and error propagation from the trace.

use cachesim_core::cache::AccessOutcome;
use cachesim_core::common::error::{SimError, TraceError};
use cachesim_core::common::{AccessKind, MemoryAccess};
use cachesim_core::config::{Config, Mapping, Organization};
use cachesim_core::{SimStats, Simulator};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::harness::{replay, simulator};

use MemoryAccess as A;

#[test]
fn from_config_validates() {
    let bad = Config::new(100, Mapping::DirectMapped, Organization::Unified);
    assert!(Simulator::from_config(&bad).is_err());

    let sim = Simulator::from_config(&Config::default()).unwrap();
    assert_eq!(sim.geometry().block_count(), 64);
    assert_eq!(*sim.stats(), SimStats::default());
}

#[rstest]
#[case(Mapping::DirectMapped)]
#[case(Mapping::FullyAssociative)]
fn unified_store_serves_both_kinds(#[case] mapping: Mapping) {
    let mut sim = simulator(256, mapping, Organization::Unified);
    assert_eq!(replay(&mut sim, &[A::data(0x80), A::instruction(0x80)]), [false, true]);
    assert_eq!(
        *sim.stats(),
        SimStats {
            accesses: 2,
            hits: 1,
            unified_hits: 1,
            data_hits: 0,
            instruction_hits: 0,
        }
    );
    assert!(std::ptr::eq(
        sim.store(AccessKind::Data),
        sim.store(AccessKind::Instruction)
    ));
}

#[rstest]
#[case(Mapping::DirectMapped)]
#[case(Mapping::FullyAssociative)]
fn split_routes_by_kind(#[case] mapping: Mapping) {
    let mut sim = simulator(512, mapping, Organization::Split);
    let hits = replay(
        &mut sim,
        &[
            A::data(0x100),
            A::instruction(0x100),
            A::data(0x100),
            A::instruction(0x100),
            A::instruction(0x100),
        ],
    );
    assert_eq!(hits, [false, false, true, true, true]);
    assert_eq!(
        *sim.stats(),
        SimStats {
            accesses: 5,
            hits: 3,
            unified_hits: 0,
            data_hits: 1,
            instruction_hits: 2,
        }
    );
    assert_eq!(sim.store(AccessKind::Data).occupancy(), 1);
    assert_eq!(sim.store(AccessKind::Instruction).occupancy(), 1);
}

/// Filling the instruction store past capacity leaves the data store's contents intact.
#[test]
fn split_stores_do_not_interfere() {
    let mut sim = simulator(256, Mapping::FullyAssociative, Organization::Split);
    let _ = sim.access(A::data(0x0));
    let _ = sim.access(A::data(0x40));
    for i in 0..16u32 {
        let _ = sim.access(A::instruction(0x1000 + i * 0x40));
    }
    assert!(sim.access(A::data(0x0)).is_hit());
    assert!(sim.access(A::data(0x40)).is_hit());
    assert_eq!(sim.store(AccessKind::Data).fifo_cursor(), Some(0));
}

#[test]
fn direct_mapped_single_line_hits_only_on_repeat() {
    // Split 128 bytes: each store is a single 64-byte line.
    let mut sim = simulator(128, Mapping::DirectMapped, Organization::Split);
    assert_eq!(sim.geometry().block_count(), 1);
    assert_eq!(sim.geometry().layout().index_bits(), 0);

    let trace = [
        A::data(0x000),
        A::data(0x020),
        A::data(0x040),
        A::data(0x000),
        A::data(0x000),
        A::data(0x1000),
    ];
    assert_eq!(
        replay(&mut sim, &trace),
        [false, true, false, false, true, false]
    );
}

#[test]
fn miss_reports_eviction() {
    let mut sim = simulator(64, Mapping::DirectMapped, Organization::Unified);
    let _ = sim.access(A::data(0x40));
    assert_eq!(
        sim.access(A::data(0x80)),
        AccessOutcome::Miss { evicted: Some(1) }
    );
}

#[test]
fn run_consumes_whole_trace() {
    let mut sim = simulator(256, Mapping::FullyAssociative, Organization::Unified);
    let trace = [A::data(0), A::data(0), A::instruction(0)].map(Ok);
    let stats = *sim.run(trace).unwrap();
    assert_eq!(stats.accesses, 3);
    assert_eq!(stats.hits, 2);
    assert_eq!(&stats, sim.stats());
}

#[test]
fn run_aborts_on_trace_error() {
    let mut sim = simulator(256, Mapping::DirectMapped, Organization::Unified);
    let trace = vec![
        Ok(A::data(0)),
        Err(TraceError::UnknownAccessType {
            line: 2,
            token: "X".into(),
        }),
        Ok(A::data(0)),
    ];
    let err = sim.run(trace).unwrap_err();
    assert!(matches!(
        err,
        SimError::Trace(TraceError::UnknownAccessType { line: 2, .. })
    ));
    assert_eq!(sim.stats().accesses, 1);
}

#[test]
fn empty_run_has_undefined_hit_rate() {
    let mut sim = simulator(256, Mapping::DirectMapped, Organization::Unified);
    let stats = sim.run(std::iter::empty()).unwrap();
    assert_eq!(stats.accesses, 0);
    assert_eq!(stats.hit_rate(), None);
}

#[test]
fn report_snapshots_geometry_and_stats() {
    let mut sim = simulator(256, Mapping::DirectMapped, Organization::Split);
    let _ = sim.access(A::data(0));
    let _ = sim.access(A::data(0));
    let report = sim.report();
    assert_eq!(report.geometry, *sim.geometry());
    assert_eq!(report.stats.data_hits, 1);
    assert_eq!(report.hit_rate, Some(0.5));
    assert_eq!(report.instruction_hit_rate, Some(0.0));
}

fn access_strategy() -> impl Strategy<Value = MemoryAccess> {
    (any::<bool>(), 0u32..0x2000).prop_map(|(is_data, addr)| {
        if is_data {
            A::data(addr)
        } else {
            A::instruction(addr)
        }
    })
}

proptest! {
    /// `accesses` grows by exactly one per access, and hits never exceed accesses.
    #[test]
    fn counters_are_monotonic(
        trace in prop::collection::vec(access_strategy(), 0..200),
        fa in any::<bool>(),
        split in any::<bool>(),
    ) {
        let mapping = if fa { Mapping::FullyAssociative } else { Mapping::DirectMapped };
        let organization = if split { Organization::Split } else { Organization::Unified };
        let mut sim = simulator(512, mapping, organization);
        let mut previous = *sim.stats();
        for access in trace {
            let hit = sim.access(access).is_hit();
            let now = *sim.stats();
            prop_assert_eq!(now.accesses, previous.accesses + 1);
            prop_assert_eq!(now.hits, previous.hits + u64::from(hit));
            prop_assert!(now.hits <= now.accesses);
            prop_assert_eq!(now.hits, now.unified_hits + now.data_hits + now.instruction_hits);
            previous = now;
        }
    }

    /// Data outcomes in a split cache are the same whether or not instruction accesses are interleaved.
    #[test]
    fn split_data_outcomes_ignore_instructions(
        trace in prop::collection::vec(access_strategy(), 0..200),
        fa in any::<bool>(),
    ) {
        let mapping = if fa { Mapping::FullyAssociative } else { Mapping::DirectMapped };
        let mut mixed = simulator(256, mapping, Organization::Split);
        let mut data_only = simulator(256, mapping, Organization::Split);
        for access in trace {
            let outcome = mixed.access(access);
            if access.kind == AccessKind::Data {
                prop_assert_eq!(outcome, data_only.access(access));
            }
        }
    }
}
