//! Tabulated distributions with exact inversion of the cumulative distribution function.
use crate::core::error::{DistributionError, Result};
use crate::core::interpolation::Interpolation;
use crate::core::random::RandomSource;
use crate::core::search;
use crate::core::{DistributionType, OneDDistribution, TabularOneDDistribution};

/// A density tabulated on a grid and interpolated with one of the [`Interpolation`] policies.
///
/// Every grid point stores its independent and dependent value, the unnormalized cumulative
/// integral up to the point and the slope of the following bin in the coordinates of the policy.
/// Sampling inverts the closed-form bin integral, so no rejection is involved.
#[derive(Clone, Debug, PartialEq)]
pub struct TabularDistribution {
    interpolation: Interpolation,
    indep: Vec<f64>,
    dep: Vec<f64>,
    cdf: Vec<f64>,
    slopes: Vec<f64>,
    norm: f64,
}

impl TabularDistribution {
    /// Constructor. The independent values must be strictly increasing, the dependent values must
    /// be non-negative and not all zero, and both need to be positive on logarithmic axes.
    pub fn new(indep: &[f64], dep: &[f64], interpolation: Interpolation) -> Result<Self> {
        interpolation.validate_grid(indep, dep)?;

        let bins = indep.len() - 1;
        let mut slopes = Vec::with_capacity(bins + 1);
        let mut cdf = Vec::with_capacity(bins + 1);
        cdf.push(0.0);

        for i in 0..bins {
            let slope = interpolation.slope(indep[i], indep[i + 1], dep[i], dep[i + 1]);
            let area = interpolation.partial_integral(indep[i], dep[i], slope, indep[i + 1]);

            slopes.push(slope);
            cdf.push(cdf[i] + area);
        }

        // the last point starts no bin
        slopes.push(0.0);

        let total = cdf[bins];

        if !(total > 0.0 && total.is_finite()) {
            return Err(DistributionError::invalid(format!(
                "the tabulated density must have a positive, finite integral, got {}",
                total
            )));
        }

        Ok(Self {
            interpolation,
            indep: indep.to_vec(),
            dep: dep.to_vec(),
            cdf,
            slopes,
            norm: 1.0 / total,
        })
    }

    /// The interpolation policy.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// The tabulated independent values.
    pub fn indep_values(&self) -> &[f64] {
        &self.indep
    }

    /// The tabulated dependent values.
    pub fn dep_values(&self) -> &[f64] {
        &self.dep
    }

    /// The reciprocal of the integral of the tabulated density.
    pub fn norm_constant(&self) -> f64 {
        self.norm
    }

    /// The integral of the unnormalized density from the lower bound to `x`.
    pub fn unnormalized_cdf(&self, x: f64) -> f64 {
        let last = self.indep.len() - 1;

        if x <= self.indep[0] {
            0.0
        } else if x >= self.indep[last] {
            self.cdf[last]
        } else {
            let i = search::bracket(&self.indep, &x);
            self.cdf[i]
                + self
                    .interpolation
                    .partial_integral(self.indep[i], self.dep[i], self.slopes[i], x)
        }
    }

    /// Draws a sample and returns it together with the index of the bin it lies in.
    pub fn sample_and_record_bin_index<R>(&self, rng: &mut R) -> (f64, usize)
    where
        R: RandomSource + ?Sized,
    {
        let u = rng.random_number();
        self.sample_at_unnormalized_cdf(u * self.cdf[self.cdf.len() - 1])
    }

    fn sample_at_unnormalized_cdf(&self, target: f64) -> (f64, usize) {
        // greatest point whose cumulative integral does not exceed the target; bins without mass
        // are skipped because they share their cumulative value with the next point
        let i = search::bracket(&self.cdf, &target);

        let x = self.interpolation.invert_partial_integral(
            self.indep[i],
            self.indep[i + 1],
            self.dep[i],
            self.slopes[i],
            target - self.cdf[i],
        );

        (x, i)
    }
}

impl OneDDistribution for TabularDistribution {
    fn evaluate(&self, x: f64) -> f64 {
        let last = self.indep.len() - 1;

        if x < self.indep[0] || x > self.indep[last] {
            0.0
        } else if x == self.indep[last] {
            self.dep[last]
        } else {
            let i = search::bracket(&self.indep, &x);
            self.interpolation
                .evaluate_with_slope(self.indep[i], self.dep[i], self.slopes[i], x)
        }
    }

    fn evaluate_pdf(&self, x: f64) -> f64 {
        self.evaluate(x) * self.norm
    }

    fn sample_and_record_trials<R>(&self, rng: &mut R, trials: &mut u64) -> f64
    where
        R: RandomSource + ?Sized,
    {
        *trials += 1;
        self.sample_and_record_bin_index(rng).0
    }

    fn lower_bound(&self) -> f64 {
        self.indep[0]
    }

    fn upper_bound(&self) -> f64 {
        self.indep[self.indep.len() - 1]
    }

    fn distribution_type(&self) -> DistributionType {
        DistributionType::Tabular
    }

    fn is_tabular(&self) -> bool {
        true
    }
}

impl TabularOneDDistribution for TabularDistribution {
    fn evaluate_cdf(&self, x: f64) -> f64 {
        if x >= self.upper_bound() {
            1.0
        } else {
            self.unnormalized_cdf(x) * self.norm
        }
    }

    fn sample_with_random_number(&self, u: f64) -> f64 {
        let (x, _) = self.sample_at_unnormalized_cdf(u * self.cdf[self.cdf.len() - 1]);
        x
    }

    fn sample_with_random_number_in_subrange(&self, u: f64, max: f64) -> f64 {
        if max >= self.upper_bound() {
            self.sample_with_random_number(u)
        } else if max <= self.lower_bound() {
            self.lower_bound()
        } else {
            let (x, _) = self.sample_at_unnormalized_cdf(u * self.unnormalized_cdf(max));
            x.min(max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::FakeStream;
    use assert_approx_eq::assert_approx_eq;

    const POLICIES: [Interpolation; 4] = [
        Interpolation::LinLin,
        Interpolation::LinLog,
        Interpolation::LogLin,
        Interpolation::LogLog,
    ];

    fn triangle() -> TabularDistribution {
        TabularDistribution::new(&[1.0, 2.0, 3.0], &[2.0, 4.0, 2.0], Interpolation::LinLin).unwrap()
    }

    #[test]
    fn evaluate() {
        let dist = triangle();

        assert_eq!(dist.evaluate(0.5), 0.0);
        assert_eq!(dist.evaluate(1.0), 2.0);
        assert_approx_eq!(dist.evaluate(1.5), 3.0);
        assert_eq!(dist.evaluate(2.0), 4.0);
        assert_eq!(dist.evaluate(3.0), 2.0);
        assert_eq!(dist.evaluate(3.1), 0.0);

        assert_approx_eq!(dist.norm_constant(), 1.0 / 6.0);
        assert_approx_eq!(dist.evaluate_pdf(1.5), 0.5);
    }

    #[test]
    fn cdf() {
        let dist = triangle();

        assert_eq!(dist.evaluate_cdf(0.0), 0.0);
        assert_eq!(dist.evaluate_cdf(1.0), 0.0);
        assert_approx_eq!(dist.evaluate_cdf(1.5), 1.25 / 6.0);
        assert_approx_eq!(dist.evaluate_cdf(2.0), 0.5);
        assert_eq!(dist.evaluate_cdf(3.0), 1.0);
        assert_eq!(dist.evaluate_cdf(4.0), 1.0);
    }

    #[test]
    fn sample() {
        let dist = triangle();
        let mut stream = FakeStream::new(vec![0.0, 0.5, 1.0 - 1e-15]).unwrap();
        let mut trials = 0;

        assert_eq!(dist.sample_and_record_trials(&mut stream, &mut trials), 1.0);
        assert_approx_eq!(dist.sample_and_record_trials(&mut stream, &mut trials), 2.0);
        assert_approx_eq!(dist.sample_and_record_trials(&mut stream, &mut trials), 3.0, 1e-7);
        assert_eq!(trials, 3);

        stream.reset();

        assert_eq!(dist.sample_and_record_bin_index(&mut stream).1, 0);
        assert_eq!(dist.sample_and_record_bin_index(&mut stream).1, 1);
        assert_eq!(dist.sample_and_record_bin_index(&mut stream).1, 1);
    }

    #[test]
    fn sample_in_subrange() {
        let dist = triangle();

        assert_approx_eq!(
            dist.sample_with_random_number_in_subrange(0.5, 2.0),
            2.5_f64.sqrt(),
            1e-14
        );
        assert_eq!(dist.sample_with_random_number_in_subrange(0.5, 0.0), 1.0);
        assert_eq!(
            dist.sample_with_random_number_in_subrange(0.3, 5.0),
            dist.sample_with_random_number(0.3)
        );

        let mut stream = FakeStream::new(vec![0.999_999]).unwrap();
        assert!(dist.sample_in_subrange(&mut stream, 1.2) <= 1.2);
    }

    #[test]
    fn inverse_of_cdf_for_every_policy() {
        let indep = [0.5, 1.0, 2.5, 4.0, 10.0];
        let dep = [1.0, 3.0, 0.25, 0.25, 2.0];

        for &policy in &POLICIES {
            let dist = TabularDistribution::new(&indep, &dep, policy).unwrap();

            assert_eq!(dist.evaluate_cdf(dist.lower_bound()), 0.0);
            assert_eq!(dist.evaluate_cdf(dist.upper_bound()), 1.0);

            for i in 0..100 {
                let u = f64::from(i) / 100.0;
                let x = dist.sample_with_random_number(u);

                assert!(x >= dist.lower_bound() && x < dist.upper_bound());
                assert_approx_eq!(dist.evaluate_cdf(x), u, 1e-12);
            }

            for (&x, &y) in indep.iter().zip(&dep) {
                assert_approx_eq!(dist.evaluate(x), y, 1e-14);
            }
        }
    }

    #[test]
    fn empty_bins_are_skipped() {
        let dist = TabularDistribution::new(
            &[0.0, 1.0, 2.0, 3.0],
            &[0.0, 0.0, 1.0, 1.0],
            Interpolation::LinLin,
        )
        .unwrap();

        assert!(dist.sample_with_random_number(0.0) >= 1.0);
        assert_approx_eq!(dist.evaluate_cdf(1.0), 0.0);
        assert_approx_eq!(dist.sample_with_random_number(1.0 / 3.0), 2.0);
    }

    #[test]
    fn invalid_grids() {
        let policy = Interpolation::LinLin;

        assert!(TabularDistribution::new(&[1.0], &[1.0], policy).is_err());
        assert!(TabularDistribution::new(&[1.0, 0.0], &[1.0, 1.0], policy).is_err());
        assert!(TabularDistribution::new(&[0.0, 1.0], &[1.0, -1.0], policy).is_err());
        assert!(TabularDistribution::new(&[0.0, 1.0], &[0.0, 0.0], policy).is_err());
        assert!(TabularDistribution::new(&[0.0, 1.0], &[1.0, 1.0], Interpolation::LogLog)
            .unwrap_err()
            .is_invalid_parameter());
    }
}
