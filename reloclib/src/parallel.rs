use std::ops::Range;
use std::thread;

use crate::error::Result;
use crate::policy::RelocationPolicy;
use crate::simulator::{range_len, simulate, SweepPoint, SweepResult};
use crate::trace::AccessTrace;

/// Partitions the capacity range into contiguous chunks and replays each chunk
/// on its own thread
///
/// Capacity runs touch only their own window, so workers need no
/// synchronisation beyond the final merge. Chunks are joined in worker order,
/// which keeps the curve sorted by capacity without a separate sort
///
/// Expects a pre-validated range; a thread count of 0 means one worker per
/// available core, clamped to the number of capacities
pub(crate) fn run(
    trace: &AccessTrace,
    largest: u64,
    policy: &RelocationPolicy,
    capacities: Range<u64>,
    threads: usize,
) -> Result<SweepResult> {
    let total = range_len(&capacities);
    if total == 0 {
        return Ok(SweepResult { points: Vec::new() });
    }
    let workers = match threads {
        0 => thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
        n => n,
    }
    .min(total);
    let chunk_size = ((total + workers - 1) / workers) as u64;

    let mut points = Vec::with_capacity(total);
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        for worker in 0..workers {
            // Ceiling division can push the last starts past the end, those
            // workers get an empty chunk
            let chunk_start = (capacities.start + worker as u64 * chunk_size).min(capacities.end);
            let chunk_end = (chunk_start + chunk_size).min(capacities.end);
            handles.push(scope.spawn(move || -> Result<Vec<SweepPoint>> {
                let mut chunk = Vec::with_capacity((chunk_end - chunk_start) as usize);
                for capacity in chunk_start..chunk_end {
                    let relocations = simulate(trace, capacity, largest, policy)?;
                    chunk.push(SweepPoint {
                        capacity,
                        relocations,
                    });
                }
                Ok(chunk)
            }));
        }
        for handle in handles {
            match handle.join() {
                Ok(chunk) => points.extend(chunk?),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        log::debug!("merged {} capacities from {workers} worker(s)", points.len());
        Ok(SweepResult { points })
    })
}
