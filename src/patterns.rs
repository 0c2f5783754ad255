//! Input generators.
//!
//! Every generator draws from a caller supplied RNG so that a single seeded generator can feed a
//! whole experiment run and be replayed exactly.

use std::env;
use std::ops::RangeInclusive;

use once_cell::sync::Lazy;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::ExperimentError;

/// Environment variable that pins [`random_init_seed`].
pub const SEED_ENV_VAR: &str = "HYBRID_SORT_SEED";

static SEED: Lazy<u64> = Lazy::new(|| {
    env::var(SEED_ENV_VAR)
        .ok()
        .and_then(|seed| seed.parse().ok())
        .unwrap_or_else(|| rand::thread_rng().gen())
});

/// Process wide seed, taken from `HYBRID_SORT_SEED` if set and valid, random otherwise. Stays
/// the same for the lifetime of the process.
pub fn random_init_seed() -> u64 {
    *SEED
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// Uniformly distributed values in `[lower, upper]`.
    Random,
    /// Zipf distributed values over `[lower, upper]`, `lower` being the most frequent.
    RandomZipf,
    /// Already sorted.
    Ascending,
    /// Sorted in reverse.
    Descending,
}

impl Pattern {
    pub fn generate<R: Rng>(
        self,
        rng: &mut R,
        len: usize,
        values: RangeInclusive<i32>,
    ) -> Result<Vec<i32>, ExperimentError> {
        let (lower, upper) = (*values.start(), *values.end());
        if lower > upper {
            return Err(ExperimentError::EmptyValueRange { lower, upper });
        }

        match self {
            Pattern::Random => Ok(random_uniform(rng, len, values)),
            Pattern::RandomZipf => random_zipf(rng, len, values),
            Pattern::Ascending => Ok(spread(len, lower, upper)),
            Pattern::Descending => {
                let mut v = spread(len, lower, upper);
                v.reverse();
                Ok(v)
            }
        }
    }
}

pub fn random_uniform<R: Rng>(rng: &mut R, len: usize, values: RangeInclusive<i32>) -> Vec<i32> {
    (0..len).map(|_| rng.gen_range(values.clone())).collect()
}

const ZIPF_EXPONENT: f64 = 1.0;

// Later zipf 7 releases deprecate `ZipfDistribution`, the dependency stays on zipf 7.
#[allow(deprecated)]
fn random_zipf<R: Rng>(
    rng: &mut R,
    len: usize,
    values: RangeInclusive<i32>,
) -> Result<Vec<i32>, ExperimentError> {
    let (lower, upper) = (*values.start(), *values.end());
    let span = (i64::from(upper) - i64::from(lower) + 1) as usize;

    let dist = zipf::ZipfDistribution::new(span, ZIPF_EXPONENT).map_err(|()| {
        ExperimentError::Zipf {
            len: span,
            exponent: ZIPF_EXPONENT,
        }
    })?;

    // Samples are in 1..=span.
    Ok((0..len)
        .map(|_| (i64::from(lower) + dist.sample(rng) as i64 - 1) as i32)
        .collect())
}

/// `len` non-decreasing values evenly spread over `[lower, upper]`.
fn spread(len: usize, lower: i32, upper: i32) -> Vec<i32> {
    if len <= 1 {
        return vec![lower; len];
    }

    let span = i64::from(upper) - i64::from(lower);
    (0..len)
        .map(|i| (i64::from(lower) + span * i as i64 / (len as i64 - 1)) as i32)
        .collect()
}
