//! Memory Access Types.
//!
//! This module defines the records produced by the trace reader and consumed by the
//! simulation driver:
//! 1. **Access Kind:** Instruction fetch versus data access, parsed from `I` / `D` tokens.
//! 2. **Memory Access:** An immutable (kind, address) pair.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::addr::Addr;
use super::error::UnknownAccessKind;

/// Kind of memory access recorded in a trace.
///
/// In a split organization the kind selects the store that services the access;
/// in a unified organization it only feeds the statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AccessKind {
    /// Instruction fetch (`I` in a trace).
    Instruction,
    /// Data load or store (`D` in a trace).
    Data,
}

impl AccessKind {
    /// Returns the single-character trace token for this kind.
    pub const fn token(self) -> char {
        match self {
            Self::Instruction => 'I',
            Self::Data => 'D',
        }
    }
}

impl FromStr for AccessKind {
    type Err = UnknownAccessKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "I" => Ok(Self::Instruction),
            "D" => Ok(Self::Data),
            other => Err(UnknownAccessKind(other.to_owned())),
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// A single decoded trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryAccess {
    /// Accessed byte address.
    pub addr: Addr,
    /// Whether the access is an instruction fetch or a data access.
    pub kind: AccessKind,
}

impl MemoryAccess {
    /// Creates an instruction-fetch access.
    #[inline]
    pub const fn instruction(addr: u32) -> Self {
        Self {
            addr: Addr::new(addr),
            kind: AccessKind::Instruction,
        }
    }

    /// Creates a data access.
    #[inline]
    pub const fn data(addr: u32) -> Self {
        Self {
            addr: Addr::new(addr),
            kind: AccessKind::Data,
        }
    }
}
