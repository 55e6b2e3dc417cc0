//! Trace reading and the simulation driver.
//!
//! Provides the reader that decodes a memory trace and the driver that replays it
//! against the configured cache.

/// Simulation driver and store routing.
pub mod simulator;

/// Text trace reader.
pub mod trace;

use std::path::Path;

pub use simulator::Simulator;
pub use trace::TraceReader;

use crate::common::error::SimError;
use crate::config::Config;
use crate::stats::SimReport;

/// Validates `config`, replays the trace at `path`, and returns the final report.
///
/// # Errors
///
/// Returns [`SimError::Config`] for an invalid configuration (before the trace
/// is opened) and [`SimError::Trace`] if the trace cannot be read or parsed.
pub fn simulate_file(config: &Config, path: impl AsRef<Path>) -> Result<SimReport, SimError> {
    let mut sim = Simulator::from_config(config)?;
    let _ = sim.run(TraceReader::open(path)?)?;
    Ok(sim.report())
}
