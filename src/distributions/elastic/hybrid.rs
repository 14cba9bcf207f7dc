//! Elastic scattering with a discrete moment-preserving forward peak.
use crate::core::error::{DistributionError, Result};
use crate::core::random::RandomSource;
use crate::core::search;
use crate::core::{DistributionType, OneDDistribution, TabularOneDDistribution};
use crate::distributions::elastic::{validate_cutoff_ratio, CutoffTable};
use crate::distributions::TabularDistribution;

/// Tabulated scattering below `μc` with probability `r`, and a set of discrete angles above `μc`
/// with probability `1 - r`.
///
/// The discrete angles carry no density, so `evaluate` and `evaluate_pdf` only describe the
/// continuous part. The cumulative distribution function steps at every discrete angle.
#[derive(Clone, Debug, PartialEq)]
pub struct HybridElasticDistribution {
    cutoff: CutoffTable,
    cutoff_cross_section_ratio: f64,
    discrete_angles: Vec<f64>,
    // normalized cumulative weights of the discrete angles
    discrete_cdf: Vec<f64>,
}

impl HybridElasticDistribution {
    /// Constructor. The discrete angles must be strictly increasing and lie in `(μc, 1]`, their
    /// cumulative weights must be non-decreasing with a positive last entry. The weights are
    /// normalized by the last entry.
    pub fn new(
        table: TabularDistribution,
        cutoff_cosine: f64,
        cutoff_cross_section_ratio: f64,
        discrete_angles: &[f64],
        cumulative_weights: &[f64],
    ) -> Result<Self> {
        validate_cutoff_ratio(cutoff_cross_section_ratio)?;

        let cutoff = CutoffTable::new(table, cutoff_cosine)?;

        if cutoff_cosine >= 1.0 {
            return Err(DistributionError::invalid(
                "the cutoff cosine must be smaller than 1 to leave room for the discrete peak",
            ));
        }

        if discrete_angles.is_empty() || discrete_angles.len() != cumulative_weights.len() {
            return Err(DistributionError::invalid(format!(
                "expected the same non-zero number of discrete angles and weights, got {} and {}",
                discrete_angles.len(),
                cumulative_weights.len()
            )));
        }

        if discrete_angles
            .iter()
            .any(|&mu| !(mu > cutoff_cosine && mu <= 1.0))
        {
            return Err(DistributionError::invalid(format!(
                "discrete angles must lie in ({}, 1]",
                cutoff_cosine
            )));
        }

        if discrete_angles.windows(2).any(|w| w[1] <= w[0]) {
            return Err(DistributionError::invalid(
                "discrete angles must be strictly increasing",
            ));
        }

        if cumulative_weights
            .iter()
            .any(|w| !(w.is_finite() && *w >= 0.0))
            || cumulative_weights.windows(2).any(|w| w[1] < w[0])
        {
            return Err(DistributionError::invalid(
                "cumulative weights of the discrete angles must be non-negative and monotone",
            ));
        }

        let total = cumulative_weights[cumulative_weights.len() - 1];

        if !(total > 0.0) {
            return Err(DistributionError::invalid(
                "the discrete angles must carry a positive total weight",
            ));
        }

        Ok(Self {
            cutoff,
            cutoff_cross_section_ratio,
            discrete_angles: discrete_angles.to_vec(),
            discrete_cdf: cumulative_weights.iter().map(|w| w / total).collect(),
        })
    }

    /// The tabulated angular distribution.
    pub fn table(&self) -> &TabularDistribution {
        self.cutoff.table()
    }

    /// The cutoff cosine `μc`.
    pub fn cutoff_cosine(&self) -> f64 {
        self.cutoff.cutoff_cosine()
    }

    /// The ratio of the cutoff cross section to the total cross section.
    pub fn cutoff_cross_section_ratio(&self) -> f64 {
        self.cutoff_cross_section_ratio
    }

    /// The discrete angles above the cutoff cosine.
    pub fn discrete_angles(&self) -> &[f64] {
        &self.discrete_angles
    }

    /// The normalized cumulative weights of the discrete angles.
    pub fn discrete_cdf(&self) -> &[f64] {
        &self.discrete_cdf
    }
}

impl OneDDistribution for HybridElasticDistribution {
    fn evaluate(&self, x: f64) -> f64 {
        self.cutoff.evaluate(x)
    }

    fn evaluate_pdf(&self, x: f64) -> f64 {
        self.cutoff_cross_section_ratio * self.cutoff.evaluate_pdf(x)
    }

    fn sample_and_record_trials<R>(&self, rng: &mut R, trials: &mut u64) -> f64
    where
        R: RandomSource + ?Sized,
    {
        *trials += 1;
        self.sample_with_random_number(rng.random_number())
    }

    fn lower_bound(&self) -> f64 {
        -1.0
    }

    fn upper_bound(&self) -> f64 {
        1.0
    }

    fn distribution_type(&self) -> DistributionType {
        DistributionType::HybridElastic
    }

    fn is_tabular(&self) -> bool {
        true
    }
}

impl TabularOneDDistribution for HybridElasticDistribution {
    fn evaluate_cdf(&self, x: f64) -> f64 {
        let ratio = self.cutoff_cross_section_ratio;

        if x <= self.cutoff.cutoff_cosine() {
            ratio * self.cutoff.evaluate_cdf(x).min(1.0)
        } else if x >= 1.0 {
            1.0
        } else {
            let discrete = search::binary_lower_bound(&self.discrete_angles, &x)
                .map_or(0.0, |i| self.discrete_cdf[i]);

            ratio + (1.0 - ratio) * discrete
        }
    }

    fn sample_with_random_number(&self, u: f64) -> f64 {
        let ratio = self.cutoff_cross_section_ratio;

        if u < ratio {
            self.cutoff.sample_with_random_number(u / ratio)
        } else if u == ratio {
            self.cutoff.cutoff_cosine()
        } else {
            let scaled = (u - ratio) / (1.0 - ratio);
            let last = self.discrete_angles.len() - 1;
            let index = search::binary_upper_bound(&self.discrete_cdf, &scaled).unwrap_or(last);

            self.discrete_angles[index]
        }
    }
}
