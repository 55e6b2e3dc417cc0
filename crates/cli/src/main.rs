//! Trace-driven cache simulator CLI.
//!
//! This binary replays a memory trace against one cache configuration. It performs:
//! 1. **Configuration:** Size, mapping and organization from positional arguments or a JSON file.
//! 2. **Simulation:** Streams `mem_trace.txt` (or `--trace`) through the simulator.
//! 3. **Reporting:** Prints the geometry header and statistics block, or a JSON report.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cachesim_core::common::constants::DEFAULT_TRACE_PATH;
use cachesim_core::common::error::SimError;
use cachesim_core::config::{Config, Mapping, Organization};
use cachesim_core::sim::{Simulator, TraceReader};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven CPU cache hit/miss simulator",
    long_about = "Replay a memory trace (one `I|D <hex address>` per line) against a cache and report hit statistics.\n\nExamples:\n  cachesim 1024 dm uc\n  cachesim 4096 fa sc --trace traces/gcc.txt\n  cachesim --config cache.json --json"
)]
struct Cli {
    /// Total cache size in bytes (128-4096, power of two).
    #[arg(required_unless_present = "config")]
    size: Option<u32>,

    /// Cache mapping.
    #[arg(value_enum, required_unless_present = "config")]
    mapping: Option<MappingArg>,

    /// Cache organization.
    #[arg(value_enum, required_unless_present = "config")]
    organization: Option<OrganizationArg>,

    /// Memory trace to replay.
    #[arg(short, long, default_value = DEFAULT_TRACE_PATH)]
    trace: PathBuf,

    /// Block size in bytes (power of two) [default: 64]. Overrides `block_bytes` from `--config`.
    #[arg(short, long)]
    block_size: Option<u32>,

    /// JSON configuration file; replaces the positional arguments.
    #[arg(short, long, conflicts_with_all = ["size", "mapping", "organization"])]
    config: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Omit the geometry header.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MappingArg {
    /// Direct-mapped.
    Dm,
    /// Fully-associative with FIFO replacement.
    Fa,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrganizationArg {
    /// Unified instruction and data cache.
    Uc,
    /// Split instruction and data caches.
    Sc,
}

impl From<MappingArg> for Mapping {
    fn from(value: MappingArg) -> Self {
        match value {
            MappingArg::Dm => Self::DirectMapped,
            MappingArg::Fa => Self::FullyAssociative,
        }
    }
}

impl From<OrganizationArg> for Organization {
    fn from(value: OrganizationArg) -> Self {
        match value {
            OrganizationArg::Uc => Self::Unified,
            OrganizationArg::Sc => Self::Split,
        }
    }
}

/// Top-level failure of a CLI run.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("could not write report: {0}")]
    Output(#[from] io::Error),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");
    if let Err(e) = run(&cli) {
        eprintln!("[!] {e}");
        process::exit(1);
    }
}

/// Builds the configuration from either `--config` or the positional arguments.
///
/// An explicit `--block-size` wins over the block size in a configuration file.
fn load_config(cli: &Cli) -> Result<Config, SimError> {
    let mut config = if let Some(path) = &cli.config {
        Config::from_file(path)?
    } else {
        // clap guarantees all three positionals when --config is absent.
        let (Some(size), Some(mapping), Some(organization)) =
            (cli.size, cli.mapping, cli.organization)
        else {
            return Ok(Config::default());
        };
        Config::new(size, mapping.into(), organization.into())
    };
    if let Some(block_bytes) = cli.block_size {
        config.block_bytes = block_bytes;
    }
    Ok(config)
}

/// Validates the configuration, replays the trace and prints the report.
fn run(cli: &Cli) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let mut sim = Simulator::from_config(&config).map_err(SimError::from)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.json && !cli.quiet {
        sim.geometry().write_summary(&mut out)?;
    }

    let trace = TraceReader::open(&cli.trace).map_err(SimError::from)?;
    let _ = sim.run(trace)?;

    if cli.json {
        serde_json::to_writer_pretty(&mut out, &sim.report()).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        sim.stats().write_report(&mut out, config.organization)?;
    }
    out.flush()?;
    Ok(())
}
