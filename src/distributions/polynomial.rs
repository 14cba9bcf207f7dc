//! Polynomial distribution.
use crate::core::error::{require_finite, DistributionError, Result};
use crate::core::interpolation::Interpolation;
use crate::core::random::RandomSource;
use crate::core::{DistributionType, OneDDistribution};

/// The density `c_0 + c_1 x + c_2 x^2 + ...` on `[a, b]` with `0 <= a < b` and non-negative
/// coefficients.
///
/// Each term is a power law that can be inverted in closed form. A sample first selects a term with
/// probability proportional to its integral over `[a, b]` and then inverts that term.
#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialDistribution {
    coefficients: Vec<f64>,
    lower_powers: Vec<f64>,
    upper_powers: Vec<f64>,
    term_cdf: Vec<f64>,
    norm: f64,
}

impl PolynomialDistribution {
    /// Constructor.
    pub fn new(coefficients: &[f64], min: f64, max: f64) -> Result<Self> {
        require_finite("lower bound", min)?;
        require_finite("upper bound", max)?;

        if min < 0.0 {
            return Err(DistributionError::invalid(format!(
                "the lower bound must not be negative, got {}",
                min
            )));
        }

        if max <= min {
            return Err(DistributionError::invalid(format!(
                "the upper bound {} must be greater than the lower bound {}",
                max, min
            )));
        }

        if let Some(bad) = coefficients.iter().find(|c| !(c.is_finite() && **c >= 0.0)) {
            return Err(DistributionError::invalid(format!(
                "polynomial coefficients must be finite and non-negative, got {}",
                bad
            )));
        }

        if coefficients.iter().all(|&c| c == 0.0) {
            return Err(DistributionError::invalid(
                "at least one polynomial coefficient must be positive",
            ));
        }

        let mut lower_powers = Vec::with_capacity(coefficients.len());
        let mut upper_powers = Vec::with_capacity(coefficients.len());
        let mut term_cdf = Vec::with_capacity(coefficients.len());
        let mut total = 0.0;

        for (i, &c) in coefficients.iter().enumerate() {
            // exponent of the antiderivative of the term
            let n = i as f64 + 1.0;
            let lower = min.powf(n);
            let upper = max.powf(n);

            total += c / n * (upper - lower);

            lower_powers.push(lower);
            upper_powers.push(upper);
            term_cdf.push(total);
        }

        if !total.is_finite() {
            return Err(DistributionError::invalid(
                "the integral of the polynomial is not finite",
            ));
        }

        for value in &mut term_cdf {
            *value /= total;
        }

        Ok(Self {
            coefficients: coefficients.to_vec(),
            lower_powers,
            upper_powers,
            term_cdf,
            norm: 1.0 / total,
        })
    }

    /// The coefficients, starting with the constant term.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// The reciprocal of the integral over the domain.
    pub fn norm_constant(&self) -> f64 {
        self.norm
    }

    /// Checks whether the density can be tabulated with the interpolation `policy`, which needs a
    /// positive lower bound on a logarithmic independent axis and a positive density on a
    /// logarithmic dependent axis.
    pub fn is_compatible_with(&self, policy: Interpolation) -> bool {
        let lower = self.lower_bound();

        // the density is non-decreasing, so its value at the lower bound is its minimum
        let indep_ok = !policy.is_indep_log() || lower > 0.0;
        let dep_ok = !policy.is_dep_log() || self.evaluate(lower) > 0.0;

        indep_ok && dep_ok
    }

    fn sample_with_random_numbers(&self, term_number: f64, value_number: f64) -> f64 {
        let last = self.term_cdf.len() - 1;
        let term = self
            .term_cdf
            .iter()
            .position(|&cdf| term_number < cdf)
            .unwrap_or(last);

        let argument = value_number * (self.upper_powers[term] - self.lower_powers[term])
            + self.lower_powers[term];

        match term {
            0 => argument,
            1 => argument.sqrt(),
            _ => argument.powf(1.0 / (term as f64 + 1.0)),
        }
    }
}

impl OneDDistribution for PolynomialDistribution {
    fn evaluate(&self, x: f64) -> f64 {
        if x < self.lower_bound() || x > self.upper_bound() {
            return 0.0;
        }

        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |sum, &c| sum * x + c)
    }

    fn evaluate_pdf(&self, x: f64) -> f64 {
        self.evaluate(x) * self.norm
    }

    fn sample_and_record_trials<R>(&self, rng: &mut R, trials: &mut u64) -> f64
    where
        R: RandomSource + ?Sized,
    {
        *trials += 1;

        let term_number = rng.random_number();
        let value_number = rng.random_number();

        self.sample_with_random_numbers(term_number, value_number)
    }

    fn lower_bound(&self) -> f64 {
        self.lower_powers[0]
    }

    fn upper_bound(&self) -> f64 {
        self.upper_powers[0]
    }

    fn distribution_type(&self) -> DistributionType {
        DistributionType::Polynomial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::FakeStream;
    use assert_approx_eq::assert_approx_eq;

    fn quadratic() -> PolynomialDistribution {
        PolynomialDistribution::new(&[1.0, 2.0, 3.0], 0.0, 1.0).unwrap()
    }

    #[test]
    fn evaluate() {
        let dist = quadratic();

        assert_eq!(dist.evaluate(-1.0), 0.0);
        assert_eq!(dist.evaluate(0.0), 1.0);
        assert_eq!(dist.evaluate(0.5), 2.75);
        assert_eq!(dist.evaluate(1.0), 6.0);
        assert_eq!(dist.evaluate(2.0), 0.0);
    }

    #[test]
    fn evaluate_pdf() {
        let dist = quadratic();

        assert_approx_eq!(dist.evaluate_pdf(0.0), 1.0 / 3.0);
        assert_approx_eq!(dist.evaluate_pdf(0.5), 2.75 / 3.0);
        assert_approx_eq!(dist.evaluate_pdf(1.0), 2.0);
        assert_eq!(dist.evaluate_pdf(1.5), 0.0);
    }

    #[test]
    fn sample() {
        let dist = quadratic();
        let mut stream = FakeStream::new(vec![0.0, 0.0, 0.0, 0.5, 0.5, 0.0, 0.5, 0.5, 0.7, 0.125])
            .unwrap();

        assert_eq!(dist.sample(&mut stream), 0.0);
        assert_eq!(dist.sample(&mut stream), 0.5);
        assert_eq!(dist.sample(&mut stream), 0.0);
        assert_approx_eq!(dist.sample(&mut stream), 0.5_f64.sqrt());
        assert_approx_eq!(dist.sample(&mut stream), 0.5);
        assert_eq!(stream.consumed(), 10);
    }

    #[test]
    fn one_trial_per_sample() {
        let dist = PolynomialDistribution::new(&[0.0, 1.0, 0.0, 4.0], 1.0, 2.0).unwrap();
        let mut stream = FakeStream::new(vec![0.1, 0.9, 0.4, 0.35]).unwrap();
        let mut trials = 0;

        for i in 1..=10 {
            let x = dist.sample_and_record_trials(&mut stream, &mut trials);

            assert!(x >= 1.0 && x <= 2.0);
            assert_eq!(trials, i);
        }
    }

    #[test]
    fn compatibility() {
        let dist = quadratic();

        assert!(dist.is_compatible_with(Interpolation::LinLin));
        assert!(dist.is_compatible_with(Interpolation::LogLin));
        assert!(!dist.is_compatible_with(Interpolation::LinLog));

        let linear = PolynomialDistribution::new(&[0.0, 1.0], 0.0, 1.0).unwrap();
        assert!(!linear.is_compatible_with(Interpolation::LogLin));

        let shifted = PolynomialDistribution::new(&[0.0, 1.0], 1.0, 2.0).unwrap();
        assert!(shifted.is_compatible_with(Interpolation::LogLog));
    }

    #[test]
    fn invalid_parameters() {
        assert!(PolynomialDistribution::new(&[0.0, 0.0], 0.0, 1.0).is_err());
        assert!(PolynomialDistribution::new(&[1.0, -1.0], 0.0, 1.0).is_err());
        assert!(PolynomialDistribution::new(&[1.0], -1.0, 1.0).is_err());
        assert!(PolynomialDistribution::new(&[1.0], 1.0, 1.0).is_err());
        assert!(PolynomialDistribution::new(&[1.0], 0.0, f64::INFINITY).is_err());
        assert!(PolynomialDistribution::new(&[], 0.0, 1.0).is_err());
    }
}
