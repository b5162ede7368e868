use std::fs::File;
use std::io::{Read, Write};

use crate::config::{OutputConfig, OutputFormatConfig};
use crate::error::Result;
use crate::simulator::SweepResult;

pub fn get_reader(file: File) -> Result<impl Read> {
    // Compatibility on other systems
    #[cfg(not(unix))]
    {
        use std::io::BufReader;
        // 4096 is the standard block size (or a multiple of it) on most systems
        const BUFFER_SIZE: usize = 16 * 4096;
        Ok(BufReader::with_capacity(BUFFER_SIZE, file))
    }
    // Memory map the file for speed on unix systems; traces are consumed in a
    // single sequential pass
    #[cfg(unix)]
    {
        use std::io::Cursor;
        use memmap2::{Advice, Mmap};
        unsafe {
            let m = Mmap::map(&file)?;
            m.advise(Advice::Sequential)?;
            Ok(Cursor::new(m))
        }
    }
}

/// Writes a swept curve in the configured format
///
/// Rows come out in increasing capacity order, one per line. With the header
/// enabled the column labels are `OLEs,comps` for csv rows and `comps` for
/// bare counts
///
/// # Arguments
///
/// * `result`: The curve to write
/// * `writer`: The output resource
/// * `output`: Format and header selection
///
/// returns: Result<()>
pub fn write_curve(
    result: &SweepResult,
    writer: &mut impl Write,
    output: &OutputConfig,
) -> Result<()> {
    match output.format {
        OutputFormatConfig::Counts => {
            if output.header {
                writeln!(writer, "comps")?;
            }
            for point in &result.points {
                writeln!(writer, "{}", point.relocations)?;
            }
        }
        OutputFormatConfig::Csv => {
            if output.header {
                writeln!(writer, "OLEs,comps")?;
            }
            for point in &result.points {
                writeln!(writer, "{},{}", point.capacity, point.relocations)?;
            }
        }
    }
    Ok(())
}
