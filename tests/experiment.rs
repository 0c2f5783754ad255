use std::io;
use std::num::NonZeroUsize;

use hybrid_sort_lab::config::{ExperimentConfig, ThresholdRange};
use hybrid_sort_lab::error::Sweep;
use hybrid_sort_lab::experiment::{
    self, reduction_percent, reference_comparisons, run_experiment, run_experiment_sorted,
    Algorithm, Harness,
};
use hybrid_sort_lab::report::{LineChart, NoopSink, PlotSink};
use hybrid_sort_lab::{ConfigError, ExperimentError, HarnessError};

#[derive(Default)]
struct RecordingSink {
    charts: Vec<LineChart>,
}

impl PlotSink for RecordingSink {
    fn line_chart(&mut self, chart: &LineChart) -> io::Result<()> {
        self.charts.push(chart.clone());
        Ok(())
    }
}

struct FailingSink;

impl PlotSink for FailingSink {
    fn line_chart(&mut self, _chart: &LineChart) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }
}

fn small_config() -> ExperimentConfig {
    let mut config = ExperimentConfig::default();
    config.seed = 7;
    config.fixed_threshold.sizes = vec![100, 500, 2_000];
    config.fixed_size.size = 3_000;
    config.fixed_size.thresholds = ThresholdRange {
        start: 1,
        end: 21,
        step: 4,
    };
    config.optimal_threshold.sizes = vec![500, 1_000];
    config.optimal_threshold.thresholds = ThresholdRange {
        start: 5,
        end: 30,
        step: 5,
    };
    config.final_comparison.size = 5_000;
    config
}

fn s(threshold: usize) -> NonZeroUsize {
    NonZeroUsize::new(threshold).unwrap()
}

#[test]
fn run_experiment_counts_and_keeps_input() {
    let input = vec![5, 1, 4, 2, 3, 9, 0];
    let result = run_experiment(&input, Algorithm::Hybrid { threshold: s(3) }).unwrap();

    assert_eq!(input, vec![5, 1, 4, 2, 3, 9, 0]);
    assert!(result.comparisons > 0);

    let insertion = run_experiment(&input, Algorithm::InsertionSort).unwrap();
    let wide = run_experiment(&input, Algorithm::Hybrid { threshold: s(7) }).unwrap();
    assert_eq!(insertion.comparisons, wide.comparisons);

    let merge = run_experiment(&input, Algorithm::MergeSort).unwrap();
    let narrow = run_experiment(&input, Algorithm::Hybrid { threshold: s(1) }).unwrap();
    assert_eq!(merge.comparisons, narrow.comparisons);

    let quick = run_experiment(&input, Algorithm::QuickSort).unwrap();
    assert!(quick.comparisons > 0);
}

#[test]
fn run_experiment_sorted_returns_measured_output() {
    let input = vec![9, -3, 7, 7, 0, 12, -3];
    let mut expected = input.clone();
    expected.sort();

    for algorithm in [
        Algorithm::Hybrid { threshold: s(2) },
        Algorithm::MergeSort,
        Algorithm::InsertionSort,
        Algorithm::QuickSort,
    ] {
        let (sorted, run) = run_experiment_sorted(&input, algorithm).unwrap();
        assert_eq!(sorted, expected);
        assert_eq!(
            run.comparisons,
            run_experiment(&input, algorithm).unwrap().comparisons
        );
    }
}

#[test]
fn runs_do_not_share_counts() {
    let input: Vec<i32> = (0..1_000).rev().collect();
    let algorithm = Algorithm::Hybrid { threshold: s(8) };

    let first = run_experiment(&input, algorithm).unwrap();
    let second = run_experiment(&input, algorithm).unwrap();
    assert_eq!(first.comparisons, second.comparisons);
}

#[test]
fn simple_test_sorts_reference_array() {
    let report = experiment::simple_test().unwrap();
    assert_eq!(report.output, vec![5, 11, 12, 22, 25, 34, 64, 90]);
    assert_eq!(report.threshold, 3);
    assert_eq!(report.comparisons, 16);
    assert!(report.to_string().contains("Sorted array"));
}

#[test]
fn reference_curve() {
    assert_eq!(reference_comparisons(0), 0.0);
    assert_eq!(reference_comparisons(1), 0.0);
    assert!((reference_comparisons(1_024) - 0.8 * 1_024.0 * 10.0).abs() < 1e-6);
}

#[test]
fn reduction() {
    assert_eq!(reduction_percent(200.0, 150.0), 25.0);
    assert_eq!(reduction_percent(100.0, 120.0), -20.0);
    assert_eq!(reduction_percent(0.0, 5.0), 0.0);
}

#[test]
fn fixed_threshold_sweep_measures_every_size() {
    let mut harness = Harness::new(small_config(), RecordingSink::default()).unwrap();
    let report = harness.fixed_threshold_sweep().unwrap();

    assert_eq!(report.threshold, 10);
    let sizes: Vec<usize> = report.points.iter().map(|p| p.size).collect();
    assert_eq!(sizes, vec![100, 500, 2_000]);
    assert!(report
        .points
        .windows(2)
        .all(|w| w[0].run.comparisons < w[1].run.comparisons));
    assert_eq!(
        report.points[2].reference_comparisons,
        reference_comparisons(2_000)
    );

    let sink = harness.into_sink();
    let names: Vec<&str> = sink.charts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["fixed_threshold_comparisons", "fixed_threshold_time"]
    );
    // Measured counts plus the reference curve.
    assert_eq!(sink.charts[0].series.len(), 2);
    assert!(sink.charts[0].series[1].reference);
    assert_eq!(sink.charts[0].series[0].points.len(), 3);
}

#[test]
fn fixed_size_sweep_reports_fastest_threshold() {
    let mut harness = Harness::new(small_config(), RecordingSink::default()).unwrap();
    let report = harness.fixed_size_sweep().unwrap();

    let thresholds: Vec<usize> = report.points.iter().map(|p| p.threshold).collect();
    assert_eq!(thresholds, vec![1, 5, 9, 13, 17, 21]);

    let fastest = report
        .points
        .iter()
        .min_by_key(|p| p.run.elapsed)
        .unwrap();
    assert_eq!(report.optimal_threshold, fastest.threshold);

    // All thresholds sorted the same input, S = 21 does more comparisons than S = 1.
    assert!(report.points[0].run.comparisons < report.points[5].run.comparisons);

    let sink = harness.into_sink();
    assert_eq!(sink.charts.len(), 2);
    assert_eq!(sink.charts[1].name, "fixed_size_time");
    assert_eq!(sink.charts[1].x_label, "Threshold Value (S)");
}

#[test]
fn optimal_threshold_search_one_optimum_per_size() {
    let mut harness = Harness::new(small_config(), RecordingSink::default()).unwrap();
    let report = harness.optimal_threshold_search().unwrap();

    let sizes: Vec<usize> = report.optima.iter().map(|o| o.size).collect();
    assert_eq!(sizes, vec![500, 1_000]);
    for optimum in &report.optima {
        assert!([5, 10, 15, 20, 25, 30].contains(&optimum.threshold));
    }

    let sink = harness.into_sink();
    assert_eq!(sink.charts.len(), 1);
    assert_eq!(sink.charts[0].name, "optimal_threshold");
    assert_eq!(sink.charts[0].series[0].points.len(), 2);
}

#[test]
fn merge_sort_comparison_percentages() {
    let mut harness = Harness::new(small_config(), NoopSink).unwrap();
    let report = harness.compare_with_merge_sort(s(1)).unwrap();

    assert_eq!(report.size, 5_000);
    // S = 1 is merge sort.
    assert_eq!(report.hybrid.comparisons, report.merge_sort.comparisons);
    assert_eq!(report.comparison_reduction_percent, 0.0);

    let report = harness.compare_with_merge_sort(s(32)).unwrap();
    let expected = reduction_percent(
        report.merge_sort.comparisons as f64,
        report.hybrid.comparisons as f64,
    );
    assert_eq!(report.comparison_reduction_percent, expected);
    assert!(report.to_string().contains("Comparisons reduced by"));
}

#[test]
fn same_seed_same_counts() {
    let run = || {
        let mut harness = Harness::new(small_config(), NoopSink).unwrap();
        harness
            .fixed_threshold_sweep()
            .unwrap()
            .points
            .iter()
            .map(|p| p.run.comparisons)
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn run_all_without_final_comparison() {
    let mut config = small_config();
    config.final_comparison.enabled = false;

    let mut harness = Harness::new(config, RecordingSink::default()).unwrap();
    let summary = harness.run_all().unwrap();

    assert_eq!(summary.seed, 7);
    assert!(summary.final_comparison.is_none());
    assert_eq!(summary.simple_test.comparisons, 16);
    assert_eq!(harness.into_sink().charts.len(), 5);
}

#[test]
fn run_all_uses_fixed_size_optimum_for_final_comparison() {
    let mut harness = Harness::new(small_config(), NoopSink).unwrap();
    let summary = harness.run_all().unwrap();

    let final_comparison = summary.final_comparison.unwrap();
    assert_eq!(
        final_comparison.threshold,
        summary.fixed_size.optimal_threshold
    );
}

#[test]
fn failing_sink_names_the_sweep() {
    let mut harness = Harness::new(small_config(), FailingSink).unwrap();
    match harness.run_all() {
        Err(HarnessError::Sweep {
            sweep,
            source: ExperimentError::Output(_),
        }) => assert_eq!(sweep, Sweep::FixedThreshold),
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = small_config();
    config.fixed_threshold.threshold = 0;

    match Harness::new(config, NoopSink) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "fixed_threshold.threshold"),
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("zero threshold accepted"),
    }
}

#[test]
fn oversized_final_comparison_is_a_config_error() {
    let mut config = small_config();
    config.final_comparison.size = usize::MAX;

    match Harness::new(config, NoopSink) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "final_comparison.size"),
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("oversized input accepted"),
    }
}

#[test]
fn unallocatable_input_is_an_error() {
    let mut harness = Harness::new(small_config(), NoopSink).unwrap();
    assert!(matches!(
        harness.generate(usize::MAX),
        Err(ExperimentError::Allocation { len: usize::MAX })
    ));

    let v = harness.generate(100).unwrap();
    assert_eq!(v.len(), 100);
    assert!(v.iter().all(|x| (1..=1_000_000).contains(x)));
}

#[test]
fn summary_json() {
    let mut config = small_config();
    config.final_comparison.size = 1_000;

    let mut harness = Harness::new(config, NoopSink).unwrap();
    let summary = harness.run_all().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");
    experiment::write_summary(&summary, &path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["seed"], 7);
    assert_eq!(json["simple_test"]["comparisons"], 16);
    assert_eq!(json["fixed_threshold"]["points"].as_array().unwrap().len(), 3);
    assert!(json["fixed_threshold"]["points"][0]["run"]["elapsed_secs"].is_f64());
    assert_eq!(json["final_comparison"]["size"], 1_000);
}
