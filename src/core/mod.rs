//! The core module
pub mod error;
pub mod interpolation;
pub mod random;
pub mod search;
pub mod special;
pub mod units;

pub use crate::core::error::{DistributionError, Result};
pub use crate::core::interpolation::Interpolation;
pub use crate::core::random::{FakeStream, RandomSource};

use serde::{Deserialize, Serialize};

/// Identifies the family a distribution belongs to.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum DistributionType {
    /// Tabulated grid with an interpolation policy.
    Tabular,
    /// Non-negative polynomial on a finite interval.
    Polynomial,
    /// Evaporation spectrum.
    Evaporation,
    /// Maxwell fission spectrum.
    MaxwellFission,
    /// Watt fission spectrum.
    Watt,
    /// Elastic angular distribution truncated at the cutoff cosine.
    CutoffElastic,
    /// Elastic angular distribution with a discrete moment-preserving peak.
    HybridElastic,
    /// Elastic angular distribution with a screened Rutherford peak.
    AnalogElastic,
}

/// One-dimensional distribution trait.
///
/// Implementors are immutable after construction and can be sampled from many threads at the
/// same time, each thread passing its own random source.
pub trait OneDDistribution: Send + Sync {
    /// Evaluates the unnormalized density at `x`. Returns zero outside of the domain.
    fn evaluate(&self, x: f64) -> f64;

    /// Evaluates the normalized density at `x`. Returns zero outside of the domain.
    fn evaluate_pdf(&self, x: f64) -> f64;

    /// Draws a sample and adds the number of candidates that were needed to `trials`.
    fn sample_and_record_trials<R>(&self, rng: &mut R, trials: &mut u64) -> f64
    where
        R: RandomSource + ?Sized;

    /// Draws a sample.
    fn sample<R>(&self, rng: &mut R) -> f64
    where
        R: RandomSource + ?Sized,
    {
        let mut trials = 0;
        self.sample_and_record_trials(rng, &mut trials)
    }

    /// The smallest value of the independent variable with non-zero density.
    fn lower_bound(&self) -> f64;

    /// The largest value of the independent variable with non-zero density.
    fn upper_bound(&self) -> f64;

    /// The family of this distribution.
    fn distribution_type(&self) -> DistributionType;

    /// All distributions in this crate are continuous.
    fn is_continuous(&self) -> bool {
        true
    }

    /// Returns `true` for distributions that also implement [`TabularOneDDistribution`].
    fn is_tabular(&self) -> bool {
        false
    }
}

/// Distributions with a cumulative distribution function that can be inverted directly.
pub trait TabularOneDDistribution: OneDDistribution {
    /// Evaluates the cumulative distribution function: zero at the lower bound and below, one at
    /// the upper bound and above.
    fn evaluate_cdf(&self, x: f64) -> f64;

    /// Returns the sample corresponding to the random number `u` in `[0, 1)`.
    fn sample_with_random_number(&self, u: f64) -> f64;

    /// Returns the sample corresponding to `u` drawn from the distribution conditioned on
    /// `[lower_bound, max]`.
    fn sample_with_random_number_in_subrange(&self, u: f64, max: f64) -> f64 {
        if max >= self.upper_bound() {
            self.sample_with_random_number(u)
        } else {
            self.sample_with_random_number(u * self.evaluate_cdf(max))
        }
    }

    /// Draws a sample from the distribution conditioned on `[lower_bound, max]`.
    fn sample_in_subrange<R>(&self, rng: &mut R, max: f64) -> f64
    where
        R: RandomSource + ?Sized,
    {
        let u = rng.random_number();
        self.sample_with_random_number_in_subrange(u, max)
    }
}
