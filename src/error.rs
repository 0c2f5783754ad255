//! Error types for configuration and experiment runs.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum ExperimentError {
    #[error("threshold must be at least 1")]
    ZeroThreshold,

    #[error("value range is empty: lower bound {lower} exceeds upper bound {upper}")]
    EmptyValueRange { lower: i32, upper: i32 },

    #[error("zipf distribution rejected {len} elements with exponent {exponent}")]
    Zipf { len: usize, exponent: f64 },

    #[error("cannot allocate an input of {len} elements")]
    Allocation { len: usize },

    #[error("nothing to sweep: {0} is empty")]
    EmptySweep(&'static str),

    #[error("{algorithm} left {len} elements unsorted")]
    NotSorted { algorithm: String, len: usize },

    #[error("writing results failed: {0}")]
    Output(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of input")]
    Eof,

    #[error("invalid number {input:?}: {reason}")]
    Invalid { input: String, reason: String },
}

/// The stage of the experiment run an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    SimpleTest,
    FixedThreshold,
    FixedSize,
    OptimalThreshold,
    FinalComparison,
    Summary,
}

impl fmt::Display for Sweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sweep::SimpleTest => "simple test",
            Sweep::FixedThreshold => "fixed threshold sweep",
            Sweep::FixedSize => "fixed size sweep",
            Sweep::OptimalThreshold => "optimal threshold search",
            Sweep::FinalComparison => "merge sort comparison",
            Sweep::Summary => "summary output",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{sweep} failed: {source}")]
    Sweep {
        sweep: Sweep,
        #[source]
        source: ExperimentError,
    },
}

/// Tags an [`ExperimentError`] with the sweep it came from.
pub trait SweepContext<T> {
    fn in_sweep(self, sweep: Sweep) -> Result<T, HarnessError>;
}

impl<T> SweepContext<T> for Result<T, ExperimentError> {
    fn in_sweep(self, sweep: Sweep) -> Result<T, HarnessError> {
        self.map_err(|source| HarnessError::Sweep { sweep, source })
    }
}
