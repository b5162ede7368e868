use std::ops::Range;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parallel;
use crate::policy::RelocationPolicy;
use crate::trace::AccessTrace;
use crate::window::CacheWindow;

/// Replays a trace against a single window of the given capacity and counts
/// how often the window has to be recomputed
///
/// The initial placement at index 0 counts as the first computation, so the
/// result is always at least 1. A first access already inside the initial
/// window leaves the count untouched, and a capacity covering the whole
/// address space never misses at all. When the policy carries the fixed
/// overhead, the constant 2 is added after the replay, but only if the window
/// was ever invalidated
///
/// # Arguments
///
/// * `trace`: The recorded access sequence, read-only
/// * `capacity`: The candidate window size under test, at least 1
/// * `largest`: The size of the addressable space, usually `trace.max_value()`
/// * `policy`: Where to re-anchor the window on a miss
///
/// returns: Result<u64>
pub fn simulate(
    trace: &AccessTrace,
    capacity: u64,
    largest: u64,
    policy: &RelocationPolicy,
) -> Result<u64> {
    if capacity == 0 {
        return Err(Error::InvalidCapacity(capacity));
    }
    let mut window = CacheWindow::new(capacity);
    let mut relocations: u64 = 1;
    for access in trace.iter() {
        if !window.contains(access) {
            relocations += 1;
            window.relocate(access, largest, policy);
        }
    }
    if policy.fixed_overhead && relocations > 1 {
        relocations += 2;
    }
    Ok(relocations)
}

/// One point of the capacity/cost curve
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct SweepPoint {
    pub capacity: u64,
    pub relocations: u64,
}

/// The curve produced by one sweep, increasing in capacity. Can be serialised,
/// and written out through `io::write_curve`
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct SweepResult {
    pub points: Vec<SweepPoint>,
}

/// Drives the window simulation across a range of capacities and collects one
/// result per capacity
///
/// It supports calling sweep multiple times, and will update the time taken to
/// simulate accordingly
pub struct Simulator<'t> {
    trace: &'t AccessTrace,
    largest: u64,
    policy: RelocationPolicy,
    simulation_time: Duration,
}

impl<'t> Simulator<'t> {
    /// Creates a new simulator over a loaded trace
    ///
    /// # Arguments
    ///
    /// * `trace`: The access trace, shared read-only by every capacity run
    /// * `largest`: The size of the addressable space, usually `trace.max_value()`
    /// * `policy`: The relocation policy applied to every run
    ///
    /// returns: Simulator
    pub fn new(trace: &'t AccessTrace, largest: u64, policy: RelocationPolicy) -> Self {
        Self {
            trace,
            largest,
            policy,
            simulation_time: Duration::new(0, 0),
        }
    }

    /// Sweeps the capacity range in increasing order, one independent replay
    /// per capacity
    ///
    /// Runs share no state: relocation trajectories are capacity dependent and
    /// not composable, so there is nothing to memoize between capacities. A
    /// range touching capacity 0 is rejected before the first run; capacities
    /// beyond the address space are accepted, the window simply stops missing.
    /// An empty range yields an empty curve
    pub fn sweep(&mut self, capacities: Range<u64>) -> Result<SweepResult> {
        validate_range(&capacities)?;
        let start = Instant::now();
        let mut points = Vec::with_capacity(range_len(&capacities));
        for capacity in capacities {
            let relocations = simulate(self.trace, capacity, self.largest, &self.policy)?;
            points.push(SweepPoint {
                capacity,
                relocations,
            });
        }
        self.simulation_time += start.elapsed();
        log::debug!(
            "swept {} capacities over {} accesses",
            points.len(),
            self.trace.len()
        );
        Ok(SweepResult { points })
    }

    /// Like `sweep`, but partitions the capacities across worker threads
    ///
    /// `threads == 0` uses every available core; workers never outnumber
    /// capacities. The curve is identical to the sequential sweep
    pub fn sweep_parallel(&mut self, capacities: Range<u64>, threads: usize) -> Result<SweepResult> {
        validate_range(&capacities)?;
        let start = Instant::now();
        let result = parallel::run(self.trace, self.largest, &self.policy, capacities, threads);
        self.simulation_time += start.elapsed();
        result
    }

    /// Gets the wall-clock execution time accumulated across sweeps
    pub fn get_execution_time(&self) -> &Duration {
        &self.simulation_time
    }
}

pub(crate) fn range_len(capacities: &Range<u64>) -> usize {
    capacities.end.saturating_sub(capacities.start) as usize
}

// A sweep must never abort mid-range, so the one rejectable capacity is caught
// before the first run
fn validate_range(capacities: &Range<u64>) -> Result<()> {
    if capacities.start == 0 && capacities.start < capacities.end {
        return Err(Error::InvalidCapacity(0));
    }
    Ok(())
}
