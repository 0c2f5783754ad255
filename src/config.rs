//! Experiment parameters.
//!
//! Defaults reproduce the reference experiment. A JSON file may override any subset of fields,
//! missing fields keep their defaults.

use std::fs;
use std::num::NonZeroUsize;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Largest input any sweep may generate, 4 GiB of `i32`.
pub const MAX_INPUT_LEN: usize = 1 << 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    /// Seed of the generator every input of a run is drawn from.
    pub seed: u64,
    pub values: ValueRange,
    pub fixed_threshold: FixedThresholdSweep,
    pub fixed_size: FixedSizeSweep,
    pub optimal_threshold: OptimalThresholdSearch,
    pub final_comparison: FinalComparison,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            values: ValueRange::default(),
            fixed_threshold: FixedThresholdSweep::default(),
            fixed_size: FixedSizeSweep::default(),
            optimal_threshold: OptimalThresholdSearch::default(),
            final_comparison: FinalComparison::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueRange {
    pub lower: i32,
    pub upper: i32,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            lower: 1,
            upper: 1_000_000,
        }
    }
}

impl ValueRange {
    pub fn as_range(&self) -> RangeInclusive<i32> {
        self.lower..=self.upper
    }
}

/// Sweep 1: one threshold, growing input sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixedThresholdSweep {
    pub threshold: usize,
    pub sizes: Vec<usize>,
}

impl Default for FixedThresholdSweep {
    fn default() -> Self {
        Self {
            threshold: 10,
            sizes: vec![
                1_000, 2_000, 5_000, 10_000, 20_000, 50_000, 100_000, 200_000, 500_000,
            ],
        }
    }
}

/// Sweep 2: one input, growing thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixedSizeSweep {
    pub size: usize,
    pub thresholds: ThresholdRange,
}

impl Default for FixedSizeSweep {
    fn default() -> Self {
        Self {
            size: 50_000,
            thresholds: ThresholdRange {
                start: 1,
                end: 49,
                step: 2,
            },
        }
    }
}

/// Sweep 3: the time minimizing threshold for each of several sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimalThresholdSearch {
    pub sizes: Vec<usize>,
    pub thresholds: ThresholdRange,
}

impl Default for OptimalThresholdSearch {
    fn default() -> Self {
        Self {
            sizes: vec![5_000, 10_000, 20_000, 50_000, 100_000],
            thresholds: ThresholdRange {
                start: 5,
                end: 100,
                step: 5,
            },
        }
    }
}

/// Hybrid with the best threshold against plain merge sort on one large input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinalComparison {
    pub enabled: bool,
    pub size: usize,
}

impl Default for FinalComparison {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 10_000_000,
        }
    }
}

/// Inclusive `start..=end` stepping by `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdRange {
    pub start: usize,
    pub end: usize,
    pub step: usize,
}

impl ThresholdRange {
    /// All thresholds in the range. Zero is never produced, a range starting at zero starts at one
    /// instead.
    pub fn values(&self) -> Vec<NonZeroUsize> {
        (self.start..=self.end)
            .step_by(self.step.max(1))
            .filter_map(NonZeroUsize::new)
            .collect()
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.step == 0 {
            return Err(invalid(field, "step must be at least 1"));
        }
        if self.start == 0 {
            return Err(invalid(field, "thresholds start at 1"));
        }
        if self.start > self.end {
            return Err(invalid(
                field,
                format!("start {} exceeds end {}", self.start, self.end),
            ));
        }
        Ok(())
    }
}

impl ExperimentConfig {
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.values.lower > self.values.upper {
            return Err(invalid(
                "values",
                format!(
                    "lower bound {} exceeds upper bound {}",
                    self.values.lower, self.values.upper
                ),
            ));
        }

        if self.fixed_threshold.threshold == 0 {
            return Err(invalid("fixed_threshold.threshold", "must be at least 1"));
        }
        if self.fixed_threshold.sizes.is_empty() {
            return Err(invalid("fixed_threshold.sizes", "no sizes given"));
        }
        check_sizes("fixed_threshold.sizes", &self.fixed_threshold.sizes)?;

        self.fixed_size.thresholds.validate("fixed_size.thresholds")?;
        if self.fixed_size.size == 0 {
            return Err(invalid("fixed_size.size", "must be at least 1"));
        }
        check_sizes("fixed_size.size", &[self.fixed_size.size])?;

        self.optimal_threshold
            .thresholds
            .validate("optimal_threshold.thresholds")?;
        if self.optimal_threshold.sizes.is_empty() {
            return Err(invalid("optimal_threshold.sizes", "no sizes given"));
        }
        check_sizes("optimal_threshold.sizes", &self.optimal_threshold.sizes)?;

        if self.final_comparison.enabled {
            if self.final_comparison.size == 0 {
                return Err(invalid("final_comparison.size", "must be at least 1"));
            }
            check_sizes("final_comparison.size", &[self.final_comparison.size])?;
        }

        Ok(())
    }
}

fn check_sizes(field: &'static str, sizes: &[usize]) -> Result<(), ConfigError> {
    match sizes.iter().find(|&&size| size > MAX_INPUT_LEN) {
        Some(size) => Err(invalid(
            field,
            format!("size {size} exceeds the maximum of {MAX_INPUT_LEN}"),
        )),
        None => Ok(()),
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
