//! Elastic scattering below the cutoff cosine only.
use crate::core::error::Result;
use crate::core::random::RandomSource;
use crate::core::{DistributionType, OneDDistribution, TabularOneDDistribution};
use crate::distributions::elastic::{validate_cutoff_ratio, CutoffTable};
use crate::distributions::TabularDistribution;

/// The tabulated angular distribution conditioned on `[-1, μc]`.
///
/// The cutoff cross-section ratio is not needed for sampling, it is kept so that callers can
/// weight the cutoff reaction.
#[derive(Clone, Debug, PartialEq)]
pub struct CutoffElasticDistribution {
    cutoff: CutoffTable,
    cutoff_cross_section_ratio: f64,
}

impl CutoffElasticDistribution {
    /// Constructor. `table` must start at `-1` and reach at least `cutoff_cosine`.
    pub fn new(
        table: TabularDistribution,
        cutoff_cosine: f64,
        cutoff_cross_section_ratio: f64,
    ) -> Result<Self> {
        validate_cutoff_ratio(cutoff_cross_section_ratio)?;

        Ok(Self {
            cutoff: CutoffTable::new(table, cutoff_cosine)?,
            cutoff_cross_section_ratio,
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
}

impl OneDDistribution for CutoffElasticDistribution {
    fn evaluate(&self, x: f64) -> f64 {
        self.cutoff.evaluate(x)
    }

    fn evaluate_pdf(&self, x: f64) -> f64 {
        self.cutoff.evaluate_pdf(x)
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
        self.cutoff.cutoff_cosine()
    }

    fn distribution_type(&self) -> DistributionType {
        DistributionType::CutoffElastic
    }

    fn is_tabular(&self) -> bool {
        true
    }
}

impl TabularOneDDistribution for CutoffElasticDistribution {
    fn evaluate_cdf(&self, x: f64) -> f64 {
        self.cutoff.evaluate_cdf(x)
    }

    fn sample_with_random_number(&self, u: f64) -> f64 {
        self.cutoff.sample_with_random_number(u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::FakeStream;
    use crate::distributions::elastic::tests::angular_table;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn evaluate() {
        let dist = CutoffElasticDistribution::new(angular_table(), 0.9, 0.8).unwrap();

        // ∫_-1^0.9 = 0.75 + 0.75 + 1.2
        assert_eq!(dist.evaluate(-1.5), 0.0);
        assert_eq!(dist.evaluate(-1.0), 0.5);
        assert_eq!(dist.evaluate(0.9), 4.0);
        assert_eq!(dist.evaluate(0.95), 0.0);
        assert_approx_eq!(dist.evaluate_pdf(0.0), 1.0 / 2.7);
        assert_eq!(dist.evaluate_pdf(1.0), 0.0);
    }

    #[test]
    fn cdf() {
        let dist = CutoffElasticDistribution::new(angular_table(), 0.9, 0.8).unwrap();

        assert_eq!(dist.evaluate_cdf(-1.0), 0.0);
        assert_approx_eq!(dist.evaluate_cdf(0.0), 0.75 / 2.7);
        assert_eq!(dist.evaluate_cdf(0.9), 1.0);
        assert_eq!(dist.evaluate_cdf(1.0), 1.0);
    }

    #[test]
    fn sample() {
        let dist = CutoffElasticDistribution::new(angular_table(), 0.9, 0.8).unwrap();
        let mut stream = FakeStream::new(vec![0.0, 0.75 / 2.7, 1.0 - 1e-15]).unwrap();
        let mut trials = 0;

        assert_eq!(dist.sample_and_record_trials(&mut stream, &mut trials), -1.0);
        assert_approx_eq!(dist.sample_and_record_trials(&mut stream, &mut trials), 0.0, 1e-14);
        assert_approx_eq!(dist.sample_and_record_trials(&mut stream, &mut trials), 0.9, 1e-12);
        assert_eq!(trials, 3);

        assert_eq!(dist.upper_bound(), 0.9);
        assert_eq!(dist.cutoff_cross_section_ratio(), 0.8);
        assert_eq!(dist.distribution_type(), DistributionType::CutoffElastic);
    }

    #[test]
    fn invalid_ratio() {
        assert!(CutoffElasticDistribution::new(angular_table(), 0.9, 0.0).is_err());
        assert!(CutoffElasticDistribution::new(angular_table(), 0.9, 1.5).is_err());
    }
}
