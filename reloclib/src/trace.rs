use std::io::{BufRead, BufReader, Read};

use crate::error::{Error, Result};

/// An ordered access trace recorded from a run of the protocol implementation
///
/// Each element is the index into the addressable space touched by the i-th
/// access in program order. Order matters and repeated indices are expected,
/// so this is deliberately a sequence rather than a set. The trace is
/// immutable once loaded and is shared read-only by every capacity run of a
/// sweep
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AccessTrace {
    accesses: Vec<u64>,
}

impl AccessTrace {
    /// Parses a trace from a resource of whitespace separated non-negative
    /// decimal integers, usually one per line
    ///
    /// The element order matches the resource order. Any token which does not
    /// parse as a non-negative integer fails the whole load; an empty resource
    /// is a valid, empty trace
    ///
    /// # Arguments
    ///
    /// * `reader`: The trace resource
    ///
    /// returns: Result<AccessTrace>
    pub fn parse(reader: impl Read) -> Result<Self> {
        let mut accesses = Vec::new();
        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            for token in line.split_whitespace() {
                let value = token.parse::<u64>().map_err(|_| Error::MalformedTrace {
                    line: index + 1,
                    token: token.to_string(),
                })?;
                accesses.push(value);
            }
        }
        Ok(Self { accesses })
    }

    /// The largest index present in the trace, or 0 for an empty trace
    ///
    /// The 0 default keeps degenerate traces usable instead of failing: a
    /// sweep over an empty trace collapses to trivial single-computation
    /// results
    pub fn max_value(&self) -> u64 {
        self.accesses.iter().copied().max().unwrap_or(0)
    }

    /// The number of accesses in the trace
    pub fn len(&self) -> usize {
        self.accesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accesses.is_empty()
    }

    /// Iterates the accesses in program order
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.accesses.iter().copied()
    }
}

impl From<Vec<u64>> for AccessTrace {
    fn from(accesses: Vec<u64>) -> Self {
        Self { accesses }
    }
}
