use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use clap::Parser;
use reloclib::config::SweepConfig;
use reloclib::io::{get_reader, write_curve};
use reloclib::simulator::Simulator;
use reloclib::trace::AccessTrace;

#[cfg(debug_assertions)]
const DEBUG_DEFAULT: bool = true;

#[cfg(not(debug_assertions))]
const DEBUG_DEFAULT: bool = false;

#[derive(Parser, Debug)]
#[command(about = String::from("Cache window recomputation sweep for recorded access traces"))]
struct Args {
    config: String,
    trace: String,

    /// Write the curve here instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Worker threads, 0 for all cores. Overrides the configured count
    #[arg(short, long)]
    threads: Option<usize>,

    #[arg(short, long)]
    performance: bool,

    #[arg(short, long, default_value_t = DEBUG_DEFAULT)]
    debug: bool,
}

fn main() -> Result<(), String> {
    env_logger::init();
    let start = Instant::now();
    let args = Args::parse();
    let config_file = File::open(&args.config)
        .map_err(|e| format!("Couldn't open the config file at path {}: {e}", args.config))?;
    let config: SweepConfig = serde_json::from_reader(BufReader::new(config_file))
        .map_err(|e| format!("Couldn't parse the config file: {e}"))?;
    let trace_file = File::open(&args.trace)
        .map_err(|e| format!("Couldn't open the trace file at path {}: {e}", args.trace))?;
    let trace_reader = get_reader(trace_file).map_err(|e| e.to_string())?;
    let trace = AccessTrace::parse(trace_reader)
        .map_err(|e| format!("Couldn't parse the trace file: {e}"))?;
    let largest = trace.max_value();
    let policy = config.policy.resolve();
    let capacities = config.resolve_range(largest).map_err(|e| e.to_string())?;
    let threads = args.threads.unwrap_or(config.threads);
    log::info!(
        "sweeping capacities {}..{} over {} accesses with {threads} thread(s)",
        capacities.start,
        capacities.end,
        trace.len()
    );
    let mut simulator = Simulator::new(&trace, largest, policy);
    let result = if threads == 1 {
        simulator.sweep(capacities)
    } else {
        simulator.sweep_parallel(capacities, threads)
    }
    .map_err(|e| e.to_string())?;
    match &args.output {
        Some(path) => {
            let mut file = File::create(path)
                .map_err(|e| format!("Couldn't create the output file at path {path}: {e}"))?;
            write_curve(&result, &mut file, &config.output).map_err(|e| e.to_string())?;
        }
        None => {
            let stdout = std::io::stdout();
            write_curve(&result, &mut stdout.lock(), &config.output).map_err(|e| e.to_string())?;
        }
    }
    if args.performance {
        let end = Instant::now();
        let simulation_time = simulator.get_execution_time();
        let total_time = end - start;
        println!("Simulation time: {}s", simulation_time.as_nanos() as f64 / 1e9);
        println!(
            "Total execution time (includes initial parsing, configuration, and output): {}s",
            total_time.as_nanos() as f64 / 1e9
        )
    }
    if args.debug {
        #[cfg(debug_assertions)]
        println!("Running the debug binary, debug mode is enabled by default. If benchmarking, do not use this binary, re-compile with the --release argument when using cargo run");
        println!("Parsed input configuration: {config:?}");
        println!(
            "Trace: {} accesses, largest index {largest}, {} relocation points",
            trace.len(),
            result.points.len()
        )
    }
    Ok(())
}
