use std::error::Error;
use std::fs;

use regex::Regex;

use crate::trace::AccessTrace;

pub const TRACE_FIXTURES_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/test-data");

/// A committed fixture trace, discovered by name
pub struct FixturePaths {
    pub name: String,
    pub trace: String,
}

/// Lists the fixture traces shipped with the crate, sorted by name
pub fn get_fixtures() -> Result<Vec<FixturePaths>, Box<dyn Error>> {
    let mut out = Vec::new();
    let pattern = Regex::new(r"^(?P<name>[0-9a-z_]+)\.txt$")?;
    let mut files = fs::read_dir(TRACE_FIXTURES_PATH)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|entry| pattern.is_match(&entry.file_name().to_string_lossy()))
        .collect::<Vec<_>>();
    files.sort_by_key(|entry| entry.file_name());
    for file in files {
        let file_name = file
            .file_name()
            .into_string()
            .map_err(|e| format!("Can't convert OS string ({e:?}) to standard string"))?;
        let tokens = pattern
            .captures(&file_name)
            .ok_or("Couldn't parse the fixture file name".to_string())?;
        let name = tokens
            .name("name")
            .ok_or("Couldn't get the trace name from the file name".to_string())?
            .as_str();
        out.push(FixturePaths {
            name: name.to_string(),
            trace: format!("{TRACE_FIXTURES_PATH}/{file_name}"),
        })
    }
    Ok(out)
}

/// Builds a trace walking 0..=largest in order, the access pattern of one
/// linear pass over the address space
pub fn scan_trace(largest: u64) -> AccessTrace {
    (0..=largest).collect::<Vec<_>>().into()
}

/// Builds a two-regime trace: a linear walk below the watermark with periodic
/// bursts into the region above it, the shape of a verifier run
///
/// Deterministic, so tests and benchmarks agree on the workload. The final
/// access pins `largest` so the advertised bound is actually present
pub fn two_regime_trace(watermark: u64, largest: u64, stride: u64) -> AccessTrace {
    assert!(watermark < largest);
    assert!(stride > 0);
    let span = largest - watermark;
    let mut accesses = Vec::new();
    for index in 0..watermark {
        accesses.push(index);
        if index % stride == stride - 1 {
            accesses.push(watermark + (index * 7) % span + 1);
        }
    }
    accesses.push(largest);
    accesses.into()
}
