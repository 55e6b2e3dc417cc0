//! Configuration, Trace and Simulation Errors.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Configuration Errors:** Malformed geometry, unknown mode tokens, unreadable config files.
//! 2. **Trace Errors:** Unknown access types, malformed records, I/O failures.
//! 3. **Simulation Errors:** The union of the two, returned by a full run.
//!
//! None of these conditions is transient, so nothing in the simulator retries.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A structural misconfiguration detected before any access is simulated.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A size parameter is zero or not a power of two.
    #[error("{field} must be a non-zero power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending parameter.
        field: &'static str,
        /// Value supplied.
        value: u32,
    },

    /// The total cache size lies outside the supported range.
    #[error("cache size {size} is outside the supported range {min}..={max} bytes")]
    SizeOutOfRange {
        /// Requested total size in bytes.
        size: u32,
        /// Smallest supported size.
        min: u32,
        /// Largest supported size.
        max: u32,
    },

    /// A single block does not fit in one store.
    #[error("a {block_bytes}-byte block does not fit in a {store_bytes}-byte store")]
    BlockLargerThanStore {
        /// Block size in bytes.
        block_bytes: u32,
        /// Capacity of each store in bytes.
        store_bytes: u32,
    },

    /// Offset and index fields together are wider than an address.
    #[error("offset and index fields need {needed} bits but addresses are {available} bits wide")]
    FieldWidthOverflow {
        /// Bits required by offset plus index.
        needed: u32,
        /// Address width.
        available: u32,
    },

    /// Mapping token was not `dm` or `fa`.
    #[error("unknown cache mapping {0:?} (expected dm or fa)")]
    UnknownMapping(String),

    /// Organization token was not `uc` or `sc`.
    #[error("unknown cache organization {0:?} (expected uc or sc)")]
    UnknownOrganization(String),

    /// Configuration JSON failed to parse.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("could not read configuration file {}: {source}", path.display())]
    Io {
        /// File that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// A trace record that cannot be turned into a [`MemoryAccess`](super::MemoryAccess).
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The access-type token was not `I` or `D`.
    #[error("line {line}: unknown access type {token:?}")]
    UnknownAccessType {
        /// Line of the offending record.
        line: usize,
        /// Token found in place of the access type.
        token: String,
    },

    /// The record does not have the `<type> <address>` shape.
    #[error("line {line}: malformed record {text:?}")]
    MalformedRecord {
        /// Line of the offending record.
        line: usize,
        /// Raw record text.
        text: String,
    },

    /// The address is not hexadecimal or does not fit in an address.
    #[error("line {line}: invalid address {text:?}")]
    InvalidAddress {
        /// Line of the offending record.
        line: usize,
        /// Address text as written.
        text: String,
    },

    /// The trace file could not be opened.
    #[error("could not open trace file {}: {source}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading from an already open trace failed.
    #[error("trace read failed: {0}")]
    Io(#[from] io::Error),
}

/// Any failure that aborts a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// The cache configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The access trace is invalid or unreadable.
    #[error(transparent)]
    Trace(#[from] TraceError),
}

/// Error returned when an access-type token is neither `I` nor `D`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown access type {0:?}")]
pub struct UnknownAccessKind(pub String);
