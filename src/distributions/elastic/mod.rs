//! Angular distributions for elastic scattering.
//!
//! All three families share a tabulated density of the scattering-angle cosine `μ` below the cutoff
//! cosine `μc`. They differ in what happens above `μc`:
//!
//! - [`CutoffElasticDistribution`] ignores the forward peak entirely,
//! - [`HybridElasticDistribution`] replaces it by a few discrete angles,
//! - [`AnalogElasticDistribution`] uses the screened Rutherford shape.
//!
//! The ratio `r` of the cutoff cross section to the total cross section is the probability of
//! scattering below `μc`. The cumulative distribution function of the hybrid and analog families
//! equals `r` exactly at `μc`, so the two branches neither overlap nor leave a gap.
pub mod analog;
pub mod cutoff;
pub mod hybrid;

pub use crate::distributions::elastic::analog::AnalogElasticDistribution;
pub use crate::distributions::elastic::cutoff::CutoffElasticDistribution;
pub use crate::distributions::elastic::hybrid::HybridElasticDistribution;

use crate::core::error::{require_finite, DistributionError, Result};
use crate::core::random::RandomSource;
use crate::core::{DistributionType, OneDDistribution, TabularOneDDistribution};
use crate::distributions::TabularDistribution;

/// Largest allowed distance of the first tabulated cosine from `-1`.
const LOWER_BOUND_TOLERANCE: f64 = 1e-12;

/// The tabulated part below the cutoff cosine, conditioned on `[-1, μc]`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CutoffTable {
    table: TabularDistribution,
    cutoff_cosine: f64,
    // unnormalized integral of the table over [-1, μc]
    integral: f64,
}

impl CutoffTable {
    fn new(table: TabularDistribution, cutoff_cosine: f64) -> Result<Self> {
        require_finite("cutoff cosine", cutoff_cosine)?;

        if (table.lower_bound() + 1.0).abs() > LOWER_BOUND_TOLERANCE {
            return Err(DistributionError::invalid(format!(
                "the angular table must start at -1, not at {}",
                table.lower_bound()
            )));
        }

        if cutoff_cosine <= -1.0 || cutoff_cosine > 1.0 {
            return Err(DistributionError::invalid(format!(
                "the cutoff cosine must lie in (-1, 1], got {}",
                cutoff_cosine
            )));
        }

        if table.upper_bound() < cutoff_cosine {
            return Err(DistributionError::invalid(format!(
                "the angular table ends at {} below the cutoff cosine {}",
                table.upper_bound(),
                cutoff_cosine
            )));
        }

        let integral = table.unnormalized_cdf(cutoff_cosine);

        if !(integral > 0.0) {
            return Err(DistributionError::invalid(
                "the angular table has no probability below the cutoff cosine",
            ));
        }

        Ok(Self {
            table,
            cutoff_cosine,
            integral,
        })
    }

    fn table(&self) -> &TabularDistribution {
        &self.table
    }

    fn cutoff_cosine(&self) -> f64 {
        self.cutoff_cosine
    }

    /// The reciprocal of the integral of the table over `[-1, μc]`.
    fn norm(&self) -> f64 {
        1.0 / self.integral
    }

    fn evaluate(&self, mu: f64) -> f64 {
        if mu > self.cutoff_cosine {
            0.0
        } else {
            self.table.evaluate(mu)
        }
    }

    fn evaluate_pdf(&self, mu: f64) -> f64 {
        self.evaluate(mu) / self.integral
    }

    fn evaluate_cdf(&self, mu: f64) -> f64 {
        if mu >= self.cutoff_cosine {
            1.0
        } else {
            self.table.unnormalized_cdf(mu) / self.integral
        }
    }

    fn sample_with_random_number(&self, u: f64) -> f64 {
        self.table
            .sample_with_random_number_in_subrange(u, self.cutoff_cosine)
    }
}

/// Fails unless the cutoff cross-section ratio lies in `(0, 1]`.
fn validate_cutoff_ratio(ratio: f64) -> Result<()> {
    if ratio > 0.0 && ratio <= 1.0 {
        Ok(())
    } else {
        Err(DistributionError::invalid(format!(
            "the cutoff cross-section ratio must lie in (0, 1], got {}",
            ratio
        )))
    }
}

/// Any of the elastic angular distributions, as built by the elastic factory.
#[derive(Clone, Debug, PartialEq)]
pub enum ElasticDistribution {
    /// Tabulated part only.
    Cutoff(CutoffElasticDistribution),
    /// Tabulated part plus discrete peak.
    Hybrid(HybridElasticDistribution),
    /// Tabulated part plus screened Rutherford peak.
    Analog(AnalogElasticDistribution),
}

impl ElasticDistribution {
    /// The cutoff cosine `μc`.
    pub fn cutoff_cosine(&self) -> f64 {
        match self {
            Self::Cutoff(dist) => dist.cutoff_cosine(),
            Self::Hybrid(dist) => dist.cutoff_cosine(),
            Self::Analog(dist) => dist.cutoff_cosine(),
        }
    }

    /// The ratio of the cutoff cross section to the total cross section.
    pub fn cutoff_cross_section_ratio(&self) -> f64 {
        match self {
            Self::Cutoff(dist) => dist.cutoff_cross_section_ratio(),
            Self::Hybrid(dist) => dist.cutoff_cross_section_ratio(),
            Self::Analog(dist) => dist.cutoff_cross_section_ratio(),
        }
    }
}

impl OneDDistribution for ElasticDistribution {
    fn evaluate(&self, x: f64) -> f64 {
        match self {
            Self::Cutoff(dist) => dist.evaluate(x),
            Self::Hybrid(dist) => dist.evaluate(x),
            Self::Analog(dist) => dist.evaluate(x),
        }
    }

    fn evaluate_pdf(&self, x: f64) -> f64 {
        match self {
            Self::Cutoff(dist) => dist.evaluate_pdf(x),
            Self::Hybrid(dist) => dist.evaluate_pdf(x),
            Self::Analog(dist) => dist.evaluate_pdf(x),
        }
    }

    fn sample_and_record_trials<R>(&self, rng: &mut R, trials: &mut u64) -> f64
    where
        R: RandomSource + ?Sized,
    {
        match self {
            Self::Cutoff(dist) => dist.sample_and_record_trials(rng, trials),
            Self::Hybrid(dist) => dist.sample_and_record_trials(rng, trials),
            Self::Analog(dist) => dist.sample_and_record_trials(rng, trials),
        }
    }

    fn lower_bound(&self) -> f64 {
        -1.0
    }

    fn upper_bound(&self) -> f64 {
        match self {
            Self::Cutoff(dist) => dist.upper_bound(),
            Self::Hybrid(dist) => dist.upper_bound(),
            Self::Analog(dist) => dist.upper_bound(),
        }
    }

    fn distribution_type(&self) -> DistributionType {
        match self {
            Self::Cutoff(dist) => dist.distribution_type(),
            Self::Hybrid(dist) => dist.distribution_type(),
            Self::Analog(dist) => dist.distribution_type(),
        }
    }

    fn is_tabular(&self) -> bool {
        true
    }
}

impl TabularOneDDistribution for ElasticDistribution {
    fn evaluate_cdf(&self, x: f64) -> f64 {
        match self {
            Self::Cutoff(dist) => dist.evaluate_cdf(x),
            Self::Hybrid(dist) => dist.evaluate_cdf(x),
            Self::Analog(dist) => dist.evaluate_cdf(x),
        }
    }

    fn sample_with_random_number(&self, u: f64) -> f64 {
        match self {
            Self::Cutoff(dist) => dist.sample_with_random_number(u),
            Self::Hybrid(dist) => dist.sample_with_random_number(u),
            Self::Analog(dist) => dist.sample_with_random_number(u),
        }
    }
}
