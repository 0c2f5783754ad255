//! Runs the full hybrid sort experiment.
//!
//! Usage:
//!   hybrid_experiments                      Reference parameters, charts in ./results
//!   hybrid_experiments --config exp.json    Override parameters from a JSON file
//!   hybrid_experiments --final-size 1m      Smaller merge sort comparison
//!   hybrid_experiments --simple-test        Only sort the fixed 8 element array
//!
//! Render the charts with: cd results && gnuplot *.gnuplot

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hybrid_sort_lab::cli::{parse_count, pin_to_first_core};
use hybrid_sort_lab::config::ExperimentConfig;
use hybrid_sort_lab::experiment::{self, Harness};
use hybrid_sort_lab::report::GnuplotSink;

#[derive(Parser)]
#[command(name = "hybrid_experiments")]
#[command(about = "Measure hybrid merge/insertion sort against input size and threshold")]
struct Args {
    /// JSON file overriding the default experiment parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed, overrides the config
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory for chart data, gnuplot scripts and summary.json
    #[arg(short, long, default_value = "results")]
    out_dir: PathBuf,

    /// Input size of the merge sort comparison (e.g., 100k, 1m, 10m)
    #[arg(long, value_parser = parse_count)]
    final_size: Option<usize>,

    /// Skip the merge sort comparison
    #[arg(long)]
    skip_final: bool,

    /// Only run the fixed array sanity check
    #[arg(long)]
    simple_test: bool,

    /// Pin the process to one core to reduce timing noise
    #[arg(long)]
    pin_core: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("An error occurred: {err:?}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: Args) -> Result<()> {
    if args.simple_test {
        let report = experiment::simple_test().context("simple test failed")?;
        println!("{report}");
        println!("Is sorted correctly: true");
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => ExperimentConfig::load_from(path)?,
        None => ExperimentConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(size) = args.final_size {
        config.final_comparison.size = size;
    }
    if args.skip_final {
        config.final_comparison.enabled = false;
    }

    if args.pin_core {
        // Unpinned runs are still valid, only noisier.
        let _ = pin_to_first_core();
    }

    println!("ALGORITHM DESIGN AND ANALYSIS");
    println!("Hybrid Sorting Algorithm Analysis");
    println!("{}", "=".repeat(50));

    let sink = GnuplotSink::new(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;
    let mut harness = Harness::new(config, sink)?;
    let summary = harness.run_all()?;

    let summary_path = args.out_dir.join("summary.json");
    experiment::write_summary(&summary, &summary_path)?;

    println!("All experiments completed successfully!");
    println!("Chart data and summary written to {}", args.out_dir.display());
    Ok(())
}
