//! Monte Carlo simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                               # 10k points for π
//!   cargo run --bin simulate -- -d coin -n 100000 -s 42    # Reproducible coin run
//!   cargo run --bin simulate -- -d gamblers-ruin --runs 5  # Five seeded repetitions
//!   cargo run --bin simulate -- --config sim.toml --json   # File config, save JSON

use clap::Parser;
use montecarlo::build_info;
use montecarlo::simulator::{convergence_study, run_simulation, Distribution, SimConfig};
use montecarlo::SimError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Sample counts used by --convergence.
const CONVERGENCE_COUNTS: [u64; 4] = [100, 1_000, 10_000, 100_000];

#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Monte Carlo estimation for coin, dice, card, gaussian, ruin and finance experiments")]
struct Args {
    /// Number of trials per run
    #[arg(short = 'n', long = "samples")]
    samples: Option<u64>,

    /// Experiment to run
    #[arg(short, long, value_enum)]
    distribution: Option<Distribution>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seeded repetitions (seed, seed + 1, ...)
    #[arg(long)]
    runs: Option<u32>,

    /// TOML configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Append a convergence table (100 to 100k samples)
    #[arg(long)]
    convergence: bool,

    /// Repeats per sample count for --convergence
    #[arg(long, default_value = "20")]
    repeats: u32,

    /// Save the report as JSON
    #[arg(long)]
    json: bool,

    /// Per-run logging
    #[arg(short, long)]
    verbose: bool,

    /// Only warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn build_config(args: &Args) -> Result<SimConfig, SimError> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(n) = args.samples {
        config.sample_count = n;
    }
    if let Some(d) = args.distribution {
        config.distribution = d;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(runs) = args.runs {
        config.runs = runs;
    }
    if args.verbose {
        config.verbosity = 2;
    } else if args.quiet {
        config.verbosity = 0;
    }
    Ok(config)
}

fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), SimError> {
    let config = build_config(args)?;
    init_logging(config.verbosity);

    if config.verbosity > 0 {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              MONTE CARLO SIMULATOR                            ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!("  Version:        {}", build_info::version_string());
        println!("  Experiment:     {}", config.distribution.as_str());
        println!("  Samples:        {}", config.sample_count);
        println!("  Runs:           {}", config.runs);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
    }

    let mut report = run_simulation(&config)?;

    if args.convergence {
        info!(repeats = args.repeats, "running convergence study");
        report.convergence = convergence_study(&config, &CONVERGENCE_COUNTS, args.repeats)?;
    }

    println!("{}", report.to_text());

    if args.json {
        let filename = format!(
            "mc_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json()?)?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}

/// Process status for a failed run: 2 for bad input, 1 for everything else.
fn exit_status(err: &SimError) -> u8 {
    if err.is_invalid_argument() {
        2
    } else {
        1
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(exit_status(&e))
        }
    }
}
