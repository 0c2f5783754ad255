//! Experiment harness.
//!
//! Each run sorts a fresh copy of its input with a fresh [`ComparisonCounter`] and times the sort
//! alone. Sweeps draw all inputs from one seeded generator owned by the [`Harness`], so a run is
//! reproducible from its config.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Serialize, Serializer};

use crate::config::ExperimentConfig;
use crate::error::{Sweep, SweepContext};
use crate::patterns::seeded_rng;
use crate::report::{
    self, format_count, format_percent, format_secs, LineChart, PlotSink, Series, Table,
};
use crate::stable::{hybrid_sort, insertion_sort, merge_sort};
use crate::unstable::quicksort;
use crate::{ComparisonCounter, ConfigError, ExperimentError, HarnessError};

/// Fixed input of the simple correctness check.
pub const SIMPLE_TEST_INPUT: [i32; 8] = [64, 34, 25, 12, 22, 11, 90, 5];
pub const SIMPLE_TEST_THRESHOLD: usize = 3;

/// Scale of the `n * log2(n)` reference curve drawn next to measured comparison counts.
pub const REFERENCE_SCALE: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Algorithm {
    Hybrid { threshold: NonZeroUsize },
    MergeSort,
    InsertionSort,
    QuickSort,
}

impl Algorithm {
    pub fn sort_counted(&self, v: &mut [i32], counter: &mut ComparisonCounter) {
        match *self {
            Algorithm::Hybrid { threshold } => hybrid_sort::sort_counted(v, threshold, counter),
            Algorithm::MergeSort => merge_sort::sort_counted(v, counter),
            Algorithm::InsertionSort => insertion_sort::sort_counted(v, counter),
            Algorithm::QuickSort => quicksort::sort_counted(v, counter),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Hybrid { threshold } => write!(f, "hybrid sort (S={threshold})"),
            Algorithm::MergeSort => f.write_str("merge sort"),
            Algorithm::InsertionSort => f.write_str("insertion sort"),
            Algorithm::QuickSort => f.write_str("quicksort"),
        }
    }
}

/// Outcome of one sort call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub comparisons: u64,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

fn serialize_secs<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(d.as_secs_f64())
}

/// Sorts a copy of `input` with `algorithm`, counting comparisons and timing only the sort.
///
/// Fails if the output is not sorted.
pub fn run_experiment(input: &[i32], algorithm: Algorithm) -> Result<RunResult, ExperimentError> {
    run_experiment_sorted(input, algorithm).map(|(_, result)| result)
}

/// Like [`run_experiment`], also handing back the sorted copy.
pub fn run_experiment_sorted(
    input: &[i32],
    algorithm: Algorithm,
) -> Result<(Vec<i32>, RunResult), ExperimentError> {
    let mut v = input.to_vec();
    let mut counter = ComparisonCounter::new();

    let start = Instant::now();
    algorithm.sort_counted(&mut v, &mut counter);
    let elapsed = start.elapsed();

    if !is_sorted(&v) {
        return Err(ExperimentError::NotSorted {
            algorithm: algorithm.to_string(),
            len: v.len(),
        });
    }

    let result = RunResult {
        comparisons: counter.get(),
        elapsed,
    };
    tracing::debug!(
        %algorithm,
        len = input.len(),
        comparisons = result.comparisons,
        elapsed_secs = result.elapsed.as_secs_f64(),
        "run finished"
    );
    Ok((v, result))
}

pub fn is_sorted<T: Ord>(v: &[T]) -> bool {
    v.windows(2).all(|w| w[0] <= w[1])
}

/// `REFERENCE_SCALE * n * log2(n)`.
pub fn reference_comparisons(n: usize) -> f64 {
    if n < 2 {
        return 0.0;
    }
    let n = n as f64;
    REFERENCE_SCALE * n * n.log2()
}

/// Percentage by which `new` undercuts `base`, negative if `new` is larger. Zero when `base` is.
pub fn reduction_percent(base: f64, new: f64) -> f64 {
    if base == 0.0 {
        return 0.0;
    }
    (base - new) / base * 100.0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleTestReport {
    pub input: Vec<i32>,
    pub output: Vec<i32>,
    pub threshold: usize,
    pub comparisons: u64,
}

/// Sorts [`SIMPLE_TEST_INPUT`] with `S = 3` and checks the result against the standard library.
pub fn simple_test() -> Result<SimpleTestReport, ExperimentError> {
    let threshold =
        NonZeroUsize::new(SIMPLE_TEST_THRESHOLD).ok_or(ExperimentError::ZeroThreshold)?;

    let mut output = SIMPLE_TEST_INPUT.to_vec();
    let right = output.len() - 1;
    let mut counter = ComparisonCounter::new();
    hybrid_sort::hybrid_sort(&mut output, 0, right, threshold, &mut counter);

    let mut expected = SIMPLE_TEST_INPUT.to_vec();
    expected.sort();
    if output != expected {
        return Err(ExperimentError::NotSorted {
            algorithm: Algorithm::Hybrid { threshold }.to_string(),
            len: output.len(),
        });
    }

    Ok(SimpleTestReport {
        input: SIMPLE_TEST_INPUT.to_vec(),
        output,
        threshold: threshold.get(),
        comparisons: counter.get(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizePoint {
    pub size: usize,
    pub run: RunResult,
    pub reference_comparisons: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedThresholdReport {
    pub threshold: usize,
    pub points: Vec<SizePoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThresholdPoint {
    pub threshold: usize,
    pub run: RunResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixedSizeReport {
    pub size: usize,
    pub points: Vec<ThresholdPoint>,
    /// Threshold of the fastest run, the first one on ties.
    pub optimal_threshold: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeOptimum {
    pub size: usize,
    pub threshold: usize,
    pub best: RunResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimalThresholdReport {
    pub optima: Vec<SizeOptimum>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeSortComparison {
    pub size: usize,
    pub threshold: usize,
    pub hybrid: RunResult,
    pub merge_sort: RunResult,
    pub comparison_reduction_percent: f64,
    pub time_reduction_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentSummary {
    pub seed: u64,
    pub simple_test: SimpleTestReport,
    pub fixed_threshold: FixedThresholdReport,
    pub fixed_size: FixedSizeReport,
    pub optimal_threshold: OptimalThresholdReport,
    pub final_comparison: Option<MergeSortComparison>,
}

/// Writes `summary` as JSON to `path`.
pub fn write_summary(
    summary: &ExperimentSummary,
    path: impl AsRef<Path>,
) -> Result<(), HarnessError> {
    report::write_json(path, summary)
        .map_err(ExperimentError::from)
        .in_sweep(Sweep::Summary)
}

pub struct Harness<S> {
    config: ExperimentConfig,
    rng: StdRng,
    sink: S,
}

impl<S: PlotSink> Harness<S> {
    pub fn new(config: ExperimentConfig, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = seeded_rng(config.seed);
        Ok(Self { config, rng, sink })
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Next uniformly random input from the harness generator.
    pub fn generate(&mut self, len: usize) -> Result<Vec<i32>, ExperimentError> {
        let mut v = Vec::new();
        v.try_reserve_exact(len)
            .map_err(|_| ExperimentError::Allocation { len })?;

        let values = self.config.values.as_range();
        v.extend((0..len).map(|_| self.rng.gen_range(values.clone())));
        Ok(v)
    }

    /// Runs every sweep in order and prints each report. The first failing sweep aborts the run and
    /// is named in the error.
    pub fn run_all(&mut self) -> Result<ExperimentSummary, HarnessError> {
        tracing::info!(seed = self.config.seed, "starting experiments");

        let simple_test = simple_test().in_sweep(Sweep::SimpleTest)?;
        println!("{simple_test}");

        let fixed_threshold = self
            .fixed_threshold_sweep()
            .in_sweep(Sweep::FixedThreshold)?;
        println!("{fixed_threshold}");

        let fixed_size = self.fixed_size_sweep().in_sweep(Sweep::FixedSize)?;
        println!("{fixed_size}");

        let optimal_threshold = self
            .optimal_threshold_search()
            .in_sweep(Sweep::OptimalThreshold)?;
        println!("{optimal_threshold}");

        let final_comparison = if self.config.final_comparison.enabled {
            let threshold = NonZeroUsize::new(fixed_size.optimal_threshold)
                .ok_or(ExperimentError::ZeroThreshold)
                .in_sweep(Sweep::FinalComparison)?;
            let comparison = self
                .compare_with_merge_sort(threshold)
                .in_sweep(Sweep::FinalComparison)?;
            println!("{comparison}");
            Some(comparison)
        } else {
            tracing::info!("merge sort comparison disabled");
            None
        };

        tracing::info!("all experiments completed");
        Ok(ExperimentSummary {
            seed: self.config.seed,
            simple_test,
            fixed_threshold,
            fixed_size,
            optimal_threshold,
            final_comparison,
        })
    }

    /// Fixed threshold, one fresh input per size.
    pub fn fixed_threshold_sweep(&mut self) -> Result<FixedThresholdReport, ExperimentError> {
        let threshold = NonZeroUsize::new(self.config.fixed_threshold.threshold)
            .ok_or(ExperimentError::ZeroThreshold)?;
        let sizes = self.config.fixed_threshold.sizes.clone();
        if sizes.is_empty() {
            return Err(ExperimentError::EmptySweep("fixed_threshold.sizes"));
        }

        tracing::info!(threshold = threshold.get(), ?sizes, "fixed threshold sweep");

        let mut points = Vec::with_capacity(sizes.len());
        for size in sizes {
            let input = self.generate(size)?;
            let run = run_experiment(&input, Algorithm::Hybrid { threshold })?;
            tracing::info!(
                size,
                comparisons = run.comparisons,
                elapsed_secs = run.elapsed.as_secs_f64(),
                "measured"
            );
            points.push(SizePoint {
                size,
                run,
                reference_comparisons: reference_comparisons(size),
            });
        }

        let report = FixedThresholdReport {
            threshold: threshold.get(),
            points,
        };
        self.plot_fixed_threshold(&report)?;
        Ok(report)
    }

    /// Fixed input, every threshold in the configured range.
    pub fn fixed_size_sweep(&mut self) -> Result<FixedSizeReport, ExperimentError> {
        let size = self.config.fixed_size.size;
        let thresholds = self.config.fixed_size.thresholds.values();

        tracing::info!(size, count = thresholds.len(), "fixed size sweep");

        // The same input for every threshold.
        let input = self.generate(size)?;
        let points = threshold_scan(&input, &thresholds)?;
        let optimal_threshold = fastest(&points)
            .ok_or(ExperimentError::EmptySweep("fixed_size.thresholds"))?
            .threshold;
        tracing::info!(size, optimal_threshold, "optimal threshold by time");

        let report = FixedSizeReport {
            size,
            points,
            optimal_threshold,
        };
        self.plot_fixed_size(&report)?;
        Ok(report)
    }

    /// For every configured size, the threshold with the lowest time.
    pub fn optimal_threshold_search(&mut self) -> Result<OptimalThresholdReport, ExperimentError> {
        let sizes = self.config.optimal_threshold.sizes.clone();
        let thresholds = self.config.optimal_threshold.thresholds.values();
        if sizes.is_empty() {
            return Err(ExperimentError::EmptySweep("optimal_threshold.sizes"));
        }

        let mut optima = Vec::with_capacity(sizes.len());
        for size in sizes {
            tracing::info!(size, "searching optimal threshold");
            let input = self.generate(size)?;
            let points = threshold_scan(&input, &thresholds)?;
            let best = fastest(&points)
                .ok_or(ExperimentError::EmptySweep("optimal_threshold.thresholds"))?;
            tracing::info!(
                size,
                threshold = best.threshold,
                elapsed_secs = best.run.elapsed.as_secs_f64(),
                "optimal threshold"
            );
            optima.push(SizeOptimum {
                size,
                threshold: best.threshold,
                best: best.run,
            });
        }

        let report = OptimalThresholdReport { optima };
        self.sink.line_chart(&LineChart {
            name: "optimal_threshold".into(),
            title: "Optimal S vs Input Size".into(),
            x_label: "Input Size (n)".into(),
            y_label: "Optimal Threshold (S)".into(),
            series: vec![Series::measured(
                "optimal S",
                report
                    .optima
                    .iter()
                    .map(|o| (o.size as f64, o.threshold as f64))
                    .collect(),
            )],
        })?;
        Ok(report)
    }

    /// Hybrid sort with `threshold` against plain merge sort on one shared input.
    pub fn compare_with_merge_sort(
        &mut self,
        threshold: NonZeroUsize,
    ) -> Result<MergeSortComparison, ExperimentError> {
        let size = self.config.final_comparison.size;
        tracing::info!(size, threshold = threshold.get(), "comparing with merge sort");

        let input = self.generate(size)?;
        let hybrid = run_experiment(&input, Algorithm::Hybrid { threshold })?;
        let merge_sort = run_experiment(&input, Algorithm::MergeSort)?;

        Ok(MergeSortComparison {
            size,
            threshold: threshold.get(),
            hybrid,
            merge_sort,
            comparison_reduction_percent: reduction_percent(
                merge_sort.comparisons as f64,
                hybrid.comparisons as f64,
            ),
            time_reduction_percent: reduction_percent(
                merge_sort.elapsed.as_secs_f64(),
                hybrid.elapsed.as_secs_f64(),
            ),
        })
    }

    fn plot_fixed_threshold(
        &mut self,
        report: &FixedThresholdReport,
    ) -> Result<(), ExperimentError> {
        let s = report.threshold;
        self.sink.line_chart(&LineChart {
            name: "fixed_threshold_comparisons".into(),
            title: format!("Comparisons vs Input Size (S={s})"),
            x_label: "Input Size (n)".into(),
            y_label: "Number of Comparisons".into(),
            series: vec![
                Series::measured(
                    "hybrid sort",
                    report
                        .points
                        .iter()
                        .map(|p| (p.size as f64, p.run.comparisons as f64))
                        .collect(),
                ),
                Series::reference(
                    "Theoretical O(n log n)",
                    report
                        .points
                        .iter()
                        .map(|p| (p.size as f64, p.reference_comparisons))
                        .collect(),
                ),
            ],
        })?;
        self.sink.line_chart(&LineChart {
            name: "fixed_threshold_time".into(),
            title: format!("Time vs Input Size (S={s})"),
            x_label: "Input Size (n)".into(),
            y_label: "Time (seconds)".into(),
            series: vec![Series::measured(
                "hybrid sort",
                report
                    .points
                    .iter()
                    .map(|p| (p.size as f64, p.run.elapsed.as_secs_f64()))
                    .collect(),
            )],
        })?;
        Ok(())
    }

    fn plot_fixed_size(&mut self, report: &FixedSizeReport) -> Result<(), ExperimentError> {
        let n = report.size;
        self.sink.line_chart(&LineChart {
            name: "fixed_size_comparisons".into(),
            title: format!("Comparisons vs Threshold S (n={n})"),
            x_label: "Threshold Value (S)".into(),
            y_label: "Number of Comparisons".into(),
            series: vec![Series::measured(
                "hybrid sort",
                report
                    .points
                    .iter()
                    .map(|p| (p.threshold as f64, p.run.comparisons as f64))
                    .collect(),
            )],
        })?;
        self.sink.line_chart(&LineChart {
            name: "fixed_size_time".into(),
            title: format!("Time vs Threshold S (n={n})"),
            x_label: "Threshold Value (S)".into(),
            y_label: "Time (seconds)".into(),
            series: vec![Series::measured(
                "hybrid sort",
                report
                    .points
                    .iter()
                    .map(|p| (p.threshold as f64, p.run.elapsed.as_secs_f64()))
                    .collect(),
            )],
        })?;
        Ok(())
    }
}

fn threshold_scan(
    input: &[i32],
    thresholds: &[NonZeroUsize],
) -> Result<Vec<ThresholdPoint>, ExperimentError> {
    thresholds
        .iter()
        .map(|&threshold| {
            let run = run_experiment(input, Algorithm::Hybrid { threshold })?;
            tracing::debug!(threshold = threshold.get(), "threshold measured");
            Ok(ThresholdPoint {
                threshold: threshold.get(),
                run,
            })
        })
        .collect()
}

/// First point with the lowest elapsed time.
fn fastest(points: &[ThresholdPoint]) -> Option<&ThresholdPoint> {
    points.iter().min_by_key(|p| p.run.elapsed)
}

impl fmt::Display for SimpleTestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Simple Test (S={}) ===", self.threshold)?;
        writeln!(f, "Original array: {:?}", self.input)?;
        writeln!(f, "Sorted array:   {:?}", self.output)?;
        writeln!(f, "Comparisons:    {}", self.comparisons)
    }
}

impl fmt::Display for FixedThresholdReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Fixed S (S={}), Varying Input Sizes ===",
            self.threshold
        )?;
        let mut table = Table::new(["n", "comparisons", "0.8 n log2 n", "time"]);
        for p in &self.points {
            table.row([
                p.size.to_string(),
                format_count(p.run.comparisons),
                format_count(p.reference_comparisons.round() as u64),
                format_secs(p.run.elapsed),
            ]);
        }
        write!(f, "{table}")
    }
}

impl fmt::Display for FixedSizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Fixed Input Size (n={}), Varying S ===", self.size)?;
        let mut table = Table::new(["S", "comparisons", "time"]);
        for p in &self.points {
            table.row([
                p.threshold.to_string(),
                format_count(p.run.comparisons),
                format_secs(p.run.elapsed),
            ]);
        }
        write!(f, "{table}")?;
        writeln!(
            f,
            "Optimal S based on minimum time: {}",
            self.optimal_threshold
        )
    }
}

impl fmt::Display for OptimalThresholdReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Optimal S for Different Input Sizes ===")?;
        let mut table = Table::new(["n", "optimal S", "best time"]);
        for o in &self.optima {
            table.row([
                o.size.to_string(),
                o.threshold.to_string(),
                format_secs(o.best.elapsed),
            ]);
        }
        write!(f, "{table}")
    }
}

impl fmt::Display for MergeSortComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Comparison with Merge Sort (n={}) ===",
            format_count(self.size as u64)
        )?;
        let mut table = Table::new(["algorithm", "comparisons", "time"]);
        table
            .row([
                format!("hybrid sort (S={})", self.threshold),
                format_count(self.hybrid.comparisons),
                format_secs(self.hybrid.elapsed),
            ])
            .row([
                "merge sort".to_string(),
                format_count(self.merge_sort.comparisons),
                format_secs(self.merge_sort.elapsed),
            ]);
        write!(f, "{table}")?;
        writeln!(
            f,
            "Comparisons reduced by: {}",
            format_percent(self.comparison_reduction_percent)
        )?;
        writeln!(
            f,
            "Time reduced by:        {}",
            format_percent(self.time_reduction_percent)
        )
    }
}
