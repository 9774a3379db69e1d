//! Branch predictor simulator CLI.
//!
//! Replays a branch trace through one configured predictor and prints its
//! misprediction statistics. It performs:
//! 1. **Configuration:** Defaults, an optional JSON file, then an optional selector.
//! 2. **Replay:** Reads the trace from a file or stdin, predicting before training.
//! 3. **Report:** Prints the branch/misprediction block (or JSON).

use std::io::{self, Write};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bpsim_core::bru::BranchPredictor;
use bpsim_core::sim::trace::TraceReader;
use bpsim_core::{PredictionStats, PredictorConfig, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "bpsim",
    author,
    version,
    about = "Trace-driven branch direction predictor simulator",
    long_about = "Replay a branch trace through a direction predictor and report mispredictions.\n\nTrace lines are either '<pc> <target> <taken> <cond> <call> <ret> <direct>' or '<pc> <taken>' (hex addresses, 0/1 flags).\n\nExamples:\n  bpsim -p gshare:13 trace.txt\n  bpsim -p tournament:12:10:10 trace.txt\n  zcat trace.gz | bpsim -p custom"
)]
struct Cli {
    /// Trace file to replay (reads stdin when omitted).
    trace: Option<String>,

    /// Predictor selector: static, gshare[:ghist], tournament[:ghist:lhist:pcindex], custom[:hist:rows_log2].
    #[arg(short, long)]
    predictor: Option<String>,

    /// JSON configuration file, applied before --predictor.
    #[arg(short, long)]
    config: Option<String>,

    /// Override the hardware storage budget in bits.
    #[arg(long)]
    budget_bits: Option<usize>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Print the predictor configuration and enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = build_config(&cli).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    });

    let mut sim = Simulator::new(&config).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    });

    if cli.verbose {
        println!(
            "Predictor: {}  Storage: {} bits  Budget: {} bits",
            sim.predictor.name(),
            sim.predictor.storage_bits(),
            config.budget_bits
        );
    }

    let replay = match cli.trace.as_deref() {
        Some(path) => TraceReader::open(path).and_then(|reader| sim.run_trace(reader)),
        None => sim.run_trace(TraceReader::new(io::stdin().lock())),
    };
    if let Err(e) = replay {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    }

    let stats = sim.finish();
    if let Err(e) = write_report(io::stdout().lock(), &stats, cli.json) {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Writes the text block or the JSON object, then flushes.
fn write_report<W: Write>(mut out: W, stats: &PredictionStats, json: bool) -> io::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut out, stats)?;
        writeln!(out)?;
    } else {
        write!(out, "{stats}")?;
    }
    out.flush()
}

/// Resolves the configuration: defaults, then the JSON file, then CLI overrides.
fn build_config(cli: &Cli) -> Result<PredictorConfig, bpsim_core::ConfigError> {
    let mut config = match cli.config.as_deref() {
        Some(path) => PredictorConfig::from_file(path)?,
        None => PredictorConfig::default(),
    };
    if let Some(selector) = cli.predictor.as_deref() {
        config.apply_selector(selector)?;
    }
    if let Some(budget) = cli.budget_bits {
        config.budget_bits = budget;
    }
    Ok(config)
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
