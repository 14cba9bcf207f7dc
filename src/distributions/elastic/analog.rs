//! Elastic scattering with a screened Rutherford forward peak.
use crate::core::error::{require_positive, DistributionError, Result};
use crate::core::random::RandomSource;
use crate::core::{DistributionType, OneDDistribution, TabularOneDDistribution};
use crate::distributions::elastic::{validate_cutoff_ratio, CutoffTable};
use crate::distributions::TabularDistribution;

/// Tabulated scattering below `μc` with probability `r`, and the screened Rutherford density
///
/// `(1 - r) η (η + Δ) / (Δ (η + 1 - μ)²)`, with `Δ = 1 - μc`,
///
/// above it, where `η` is the Moliere screening constant. The peak integrates to `1 - r` over
/// `(μc, 1]` and its cumulative distribution function inverts algebraically.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalogElasticDistribution {
    cutoff: CutoffTable,
    cutoff_cross_section_ratio: f64,
    screening_parameter: f64,
}

impl AnalogElasticDistribution {
    /// Constructor.
    pub fn new(
        table: TabularDistribution,
        cutoff_cosine: f64,
        cutoff_cross_section_ratio: f64,
        screening_parameter: f64,
    ) -> Result<Self> {
        validate_cutoff_ratio(cutoff_cross_section_ratio)?;
        require_positive("screening parameter", screening_parameter)?;

        let cutoff = CutoffTable::new(table, cutoff_cosine)?;

        if cutoff_cosine >= 1.0 {
            return Err(DistributionError::invalid(
                "the cutoff cosine must be smaller than 1 to leave room for the screened peak",
            ));
        }

        Ok(Self {
            cutoff,
            cutoff_cross_section_ratio,
            screening_parameter,
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

    /// The Moliere screening constant `η`.
    pub fn screening_parameter(&self) -> f64 {
        self.screening_parameter
    }

    /// The normalization constant relating `evaluate` to `evaluate_pdf` on the whole domain.
    pub fn norm_constant(&self) -> f64 {
        self.cutoff_cross_section_ratio * self.cutoff.norm()
    }

    fn delta(&self) -> f64 {
        1.0 - self.cutoff.cutoff_cosine()
    }

    fn peak_pdf(&self, mu: f64) -> f64 {
        let eta = self.screening_parameter;
        let delta = self.delta();
        let denominator = eta + 1.0 - mu;

        (1.0 - self.cutoff_cross_section_ratio) * eta * (eta + delta)
            / (delta * denominator * denominator)
    }

    /// Fraction of the peak between `μc` and `mu`.
    fn peak_cdf(&self, mu: f64) -> f64 {
        let eta = self.screening_parameter;
        let delta = self.delta();

        eta * (mu - self.cutoff.cutoff_cosine()) / (delta * (eta + 1.0 - mu))
    }
}

impl OneDDistribution for AnalogElasticDistribution {
    fn evaluate(&self, x: f64) -> f64 {
        if x < -1.0 || x > 1.0 {
            0.0
        } else if x <= self.cutoff.cutoff_cosine() {
            self.cutoff.evaluate(x)
        } else {
            self.peak_pdf(x) / self.norm_constant()
        }
    }

    fn evaluate_pdf(&self, x: f64) -> f64 {
        if x < -1.0 || x > 1.0 {
            0.0
        } else if x <= self.cutoff.cutoff_cosine() {
            self.cutoff_cross_section_ratio * self.cutoff.evaluate_pdf(x)
        } else {
            self.peak_pdf(x)
        }
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
        DistributionType::AnalogElastic
    }

    fn is_tabular(&self) -> bool {
        true
    }
}

impl TabularOneDDistribution for AnalogElasticDistribution {
    fn evaluate_cdf(&self, x: f64) -> f64 {
        let ratio = self.cutoff_cross_section_ratio;

        if x <= self.cutoff.cutoff_cosine() {
            ratio * self.cutoff.evaluate_cdf(x)
        } else if x >= 1.0 {
            1.0
        } else {
            ratio + (1.0 - ratio) * self.peak_cdf(x)
        }
    }

    fn sample_with_random_number(&self, u: f64) -> f64 {
        let ratio = self.cutoff_cross_section_ratio;

        if u < ratio {
            return self.cutoff.sample_with_random_number(u / ratio);
        }

        let scaled = (u - ratio) / (1.0 - ratio);
        let eta = self.screening_parameter;
        let delta = self.delta();
        let cutoff_cosine = self.cutoff.cutoff_cosine();

        ((eta * cutoff_cosine + (1.0 + eta) * delta * scaled) / (eta + delta * scaled)).min(1.0)
    }
}
