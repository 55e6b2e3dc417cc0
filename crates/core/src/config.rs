//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures and enums that parameterize a run.
//! It provides:
//! 1. **Defaults:** Reference geometry (4 KiB, 64-byte blocks, direct-mapped, unified).
//! 2. **Enums:** Mapping (direct-mapped / fully-associative) and organization (unified / split).
//! 3. **Loading:** Construction from CLI values or JSON, and validation into a [`CacheGeometry`].

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::CacheGeometry;
use crate::common::constants::{DEFAULT_BLOCK_BYTES, MAX_CACHE_BYTES, MIN_CACHE_BYTES};
use crate::common::error::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Default total cache size in bytes (4 KiB).
    pub const CACHE_SIZE: u32 = 4096;

    /// Default block size in bytes.
    pub const BLOCK_SIZE: u32 = super::DEFAULT_BLOCK_BYTES;
}

/// Where a block may be placed in a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Mapping {
    /// Each address maps to exactly one line, selected by the index field.
    #[default]
    #[serde(rename = "dm", alias = "DirectMapped")]
    DirectMapped,
    /// Any line may hold any block; victims are chosen in FIFO order.
    #[serde(rename = "fa", alias = "FullyAssociative")]
    FullyAssociative,
}

/// How instruction and data accesses share cache capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Organization {
    /// One store services every access.
    #[default]
    #[serde(rename = "uc", alias = "Unified")]
    Unified,
    /// Separate instruction and data stores, each with half the capacity.
    #[serde(rename = "sc", alias = "Split")]
    Split,
}

impl Mapping {
    /// Returns the short token used on the command line.
    pub const fn token(self) -> &'static str {
        match self {
            Self::DirectMapped => "dm",
            Self::FullyAssociative => "fa",
        }
    }
}

impl Organization {
    /// Returns the short token used on the command line.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Unified => "uc",
            Self::Split => "sc",
        }
    }

    /// Number of independent stores this organization allocates.
    pub const fn store_count(self) -> u32 {
        match self {
            Self::Unified => 1,
            Self::Split => 2,
        }
    }
}

impl FromStr for Mapping {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dm" => Ok(Self::DirectMapped),
            "fa" => Ok(Self::FullyAssociative),
            other => Err(ConfigError::UnknownMapping(other.to_owned())),
        }
    }
}

impl FromStr for Organization {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uc" => Ok(Self::Unified),
            "sc" => Ok(Self::Split),
            other => Err(ConfigError::UnknownOrganization(other.to_owned())),
        }
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Root configuration structure.
///
/// Built from command-line values with [`Config::new`] or deserialized from JSON.
/// Nothing is checked until [`Config::geometry`] is called.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{Config, Mapping, Organization};
///
/// let json = r#"{ "size_bytes": 1024, "mapping": "fa", "organization": "sc" }"#;
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.block_bytes, 64);
/// assert_eq!(config.mapping, Mapping::FullyAssociative);
///
/// let geometry = config.geometry().unwrap();
/// assert_eq!(geometry.block_count(), 8);
/// assert_eq!(geometry.layout().tag_bits(), 26);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Total cache capacity in bytes, shared by both stores when split.
    ///
    /// Required in JSON; there is no implicit size.
    pub size_bytes: u32,

    /// Block (line) size in bytes.
    #[serde(default = "Config::default_block")]
    pub block_bytes: u32,

    /// Placement policy.
    #[serde(default)]
    pub mapping: Mapping,

    /// Unified or split instruction/data stores.
    #[serde(default)]
    pub organization: Organization,
}

impl Config {
    /// Creates a configuration with the default block size.
    pub const fn new(size_bytes: u32, mapping: Mapping, organization: Organization) -> Self {
        Self {
            size_bytes,
            block_bytes: defaults::BLOCK_SIZE,
            mapping,
            organization,
        }
    }

    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document is malformed, `size_bytes`
    /// is missing, or a field has the wrong type or an unknown enum value.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Json`] if it does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Validates the configuration and derives the cache geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SizeOutOfRange`] if the total size lies outside the
    /// supported range, and any error from [`CacheGeometry::new`].
    pub fn geometry(&self) -> Result<CacheGeometry, ConfigError> {
        if !(MIN_CACHE_BYTES..=MAX_CACHE_BYTES).contains(&self.size_bytes) {
            return Err(ConfigError::SizeOutOfRange {
                size: self.size_bytes,
                min: MIN_CACHE_BYTES,
                max: MAX_CACHE_BYTES,
            });
        }
        CacheGeometry::new(
            self.size_bytes,
            self.block_bytes,
            self.mapping,
            self.organization,
        )
    }

    /// Returns the default block size.
    const fn default_block() -> u32 {
        defaults::BLOCK_SIZE
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            defaults::CACHE_SIZE,
            Mapping::default(),
            Organization::default(),
        )
    }
}
