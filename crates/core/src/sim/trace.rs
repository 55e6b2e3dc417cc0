//! Memory Trace Reader.
//!
//! This module turns a text trace into a stream of [`MemoryAccess`] records. It performs:
//! 1. **Parsing:** One `<I|D> <hex address>` record per line; `0x` is optional.
//! 2. **Termination:** End of input ends the stream. Address 0 is an ordinary access.
//! 3. **Validation:** Unknown access types and malformed records are fatal errors.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::Path;

use crate::common::addr::Addr;
use crate::common::data::{AccessKind, MemoryAccess};
use crate::common::error::TraceError;

/// Parses one trace line.
///
/// Returns `Ok(None)` for a blank line.
///
/// # Errors
///
/// - [`TraceError::MalformedRecord`] if the line does not have exactly two fields.
/// - [`TraceError::UnknownAccessType`] if the first field is not `I` or `D`.
/// - [`TraceError::InvalidAddress`] if the second field is not a 32-bit hex number.
pub fn parse_record(line: usize, text: &str) -> Result<Option<MemoryAccess>, TraceError> {
    let mut fields = text.split_whitespace();
    let Some(kind) = fields.next() else {
        return Ok(None);
    };
    let (Some(addr), None) = (fields.next(), fields.next()) else {
        return Err(TraceError::MalformedRecord {
            line,
            text: text.trim().to_owned(),
        });
    };

    let kind: AccessKind = kind
        .parse()
        .map_err(|_| TraceError::UnknownAccessType {
            line,
            token: kind.to_owned(),
        })?;

    let digits = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr);
    let addr = u32::from_str_radix(digits, 16).map_err(|_| TraceError::InvalidAddress {
        line,
        text: addr.to_owned(),
    })?;

    Ok(Some(MemoryAccess {
        addr: Addr::new(addr),
        kind,
    }))
}

/// Lazy, finite, non-restartable reader over a text trace.
///
/// Yields `Ok` for every record and stops after the first error.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: io::Lines<R>,
    line: usize,
    failed: bool,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            failed: false,
        }
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Open`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<MemoryAccess, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            };
            self.line += 1;
            match parse_record(self.line, &text) {
                Ok(Some(access)) => return Some(Ok(access)),
                Ok(None) => {}
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<R: BufRead> FusedIterator for TraceReader<R> {}
