use std::io::Read;
use std::ops::Range;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::policy::{ParamSet, RelocationPolicy};

/// A full sweep configuration, usually resulting from parsing JSON
#[derive(Debug, Deserialize)]
pub struct SweepConfig {
    /// Smallest capacity to test
    #[serde(default = "default_min_capacity")]
    pub min_capacity: u64,
    /// Exclusive upper capacity bound; overrides `bound` when present
    #[serde(default)]
    pub max_capacity: Option<u64>,
    /// How to derive the upper bound when `max_capacity` is absent
    #[serde(default)]
    pub bound: SweepBoundConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Worker threads for the sweep, 0 for all available cores
    #[serde(default = "default_threads")]
    pub threads: usize,
}

fn default_min_capacity() -> u64 {
    1
}

fn default_threads() -> usize {
    1
}

impl SweepConfig {
    /// Reads a configuration from a JSON resource
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|e| Error::Config(e.to_string()))
    }

    /// Resolves the swept capacity range against the largest index of the
    /// loaded trace
    ///
    /// Fails up front when the range would include capacity 0, or when the
    /// working-set bound is requested without a parameter set to derive it
    /// from. Nothing else is rejected here; oversized capacities degrade
    /// gracefully inside the simulator
    pub fn resolve_range(&self, largest: u64) -> Result<Range<u64>> {
        if self.min_capacity == 0 {
            return Err(Error::InvalidCapacity(0));
        }
        let max = match (self.max_capacity, self.bound) {
            (Some(max), _) => max,
            (None, SweepBoundConfig::Largest) => largest + 1,
            (None, SweepBoundConfig::WorkingSet) => self
                .policy
                .param_set
                .map(ParamSet::working_set_bound)
                .ok_or_else(|| {
                    Error::Config("the working-set bound requires policy.param_set".to_string())
                })?,
        };
        Ok(self.min_capacity..max)
    }
}

/// The rule used to derive the exclusive upper capacity bound
#[derive(Debug, Copy, Clone, Deserialize)]
pub enum SweepBoundConfig {
    /// Sweep up to and including the largest index in the trace
    #[serde(alias = "largest")]
    Largest,
    /// Sweep up to the combined working set of both addressing regimes
    #[serde(alias = "working-set")]
    WorkingSet,
}

impl Default for SweepBoundConfig {
    fn default() -> Self {
        SweepBoundConfig::Largest
    }
}

/// The relocation policy, as configured. Defaults to clamp-only behavior.
#[derive(Debug, Default, Deserialize)]
pub struct PolicyConfig {
    /// Parameter set supplying the watermark, and the working-set bound if used
    #[serde(default)]
    pub param_set: Option<ParamSet>,
    /// Explicit watermark, takes precedence over the parameter set
    #[serde(default)]
    pub high_watermark: Option<u64>,
    #[serde(default)]
    pub fixed_overhead: bool,
}

impl PolicyConfig {
    /// Resolves the configured policy to its runtime form
    pub fn resolve(&self) -> RelocationPolicy {
        RelocationPolicy {
            high_watermark: self
                .high_watermark
                .or_else(|| self.param_set.map(ParamSet::watermark)),
            fixed_overhead: self.fixed_overhead,
        }
    }
}

/// How the swept curve is written out
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormatConfig,
    /// Emit the column label line before the rows
    #[serde(default)]
    pub header: bool,
}

/// The two curve formats the saved result files use - bare counts, or
/// capacity,count rows. Defaults to bare counts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
pub enum OutputFormatConfig {
    /// One relocation count per line, the capacity implied by the row position
    #[serde(alias = "counts")]
    Counts,
    /// `capacity,count` rows
    #[serde(alias = "csv")]
    Csv,
}

impl Default for OutputFormatConfig {
    fn default() -> Self {
        OutputFormatConfig::Counts
    }
}
