//! Sorts one generated array and prints it before and after, with time and comparison count.
//!
//! Size and maximum value are prompted for on stdin unless given as flags.

use std::io;
use std::num::NonZeroUsize;
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};

use hybrid_sort_lab::cli::prompt;
use hybrid_sort_lab::experiment::{run_experiment_sorted, Algorithm};
use hybrid_sort_lab::patterns::{self, Pattern};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Hybrid,
    MergeSort,
    InsertionSort,
    QuickSort,
}

impl AlgorithmArg {
    fn with_threshold(self, threshold: NonZeroUsize) -> Algorithm {
        match self {
            AlgorithmArg::Hybrid => Algorithm::Hybrid { threshold },
            AlgorithmArg::MergeSort => Algorithm::MergeSort,
            AlgorithmArg::InsertionSort => Algorithm::InsertionSort,
            AlgorithmArg::QuickSort => Algorithm::QuickSort,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PatternArg {
    Random,
    RandomZipf,
    Ascending,
    Descending,
}

impl From<PatternArg> for Pattern {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::Random => Pattern::Random,
            PatternArg::RandomZipf => Pattern::RandomZipf,
            PatternArg::Ascending => Pattern::Ascending,
            PatternArg::Descending => Pattern::Descending,
        }
    }
}

#[derive(Parser)]
#[command(name = "hybrid_adhoc")]
#[command(about = "Sort one random array and report time and comparisons")]
struct Args {
    /// Array size, prompted for if missing
    #[arg(long)]
    size: Option<usize>,

    /// Largest generated value, prompted for if missing
    #[arg(long)]
    max: Option<i32>,

    /// Insertion sort threshold S of the hybrid sort
    #[arg(short, long, default_value = "10")]
    threshold: NonZeroUsize,

    #[arg(short, long, value_enum, default_value_t = AlgorithmArg::Hybrid)]
    algorithm: AlgorithmArg,

    #[arg(short, long, value_enum, default_value_t = PatternArg::Random)]
    pattern: PatternArg,

    /// Random seed, defaults to $HYBRID_SORT_SEED or a random one
    #[arg(short, long)]
    seed: Option<u64>,

    /// Don't print the arrays
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let size = match args.size {
        Some(size) => size,
        None => prompt(&mut input, &mut stdout, "Enter size of array: ")?,
    };
    let max = match args.max {
        Some(max) => max,
        None => prompt(&mut input, &mut stdout, "Enter maximum value: ")?,
    };
    if max < 0 {
        bail!("maximum value must not be negative, got {max}");
    }

    let seed = args.seed.unwrap_or_else(patterns::random_init_seed);
    tracing::info!(seed, size, max, "generating input");
    let mut rng = patterns::seeded_rng(seed);
    let arr = Pattern::from(args.pattern).generate(&mut rng, size, 0..=max)?;

    if !args.quiet {
        println!("{arr:?}");
    }

    let algorithm = args.algorithm.with_threshold(args.threshold);
    let (sorted, result) = run_experiment_sorted(&arr, algorithm)?;

    if !args.quiet {
        println!();
        println!("{sorted:?}");
    }

    println!();
    println!("Algorithm: {algorithm}");
    println!("Time taken: {} microseconds", result.elapsed.as_micros());
    println!("# of comparisons: {}", result.comparisons);
    Ok(())
}
