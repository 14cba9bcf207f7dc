//! Evaporation spectrum.
use crate::core::error::{require_finite, require_positive, DistributionError, Result};
use crate::core::random::RandomSource;
use crate::core::special;
use crate::core::{DistributionType, OneDDistribution};

/// Above this ratio of the energy range to the temperature the closed-form integral is used.
const SERIES_LIMIT: f64 = 30.0;

/// Below this ratio of the energy range to the temperature candidates are drawn on `[0, E - U]`.
const BOUNDED_PROPOSAL_LIMIT: f64 = 0.5;

/// The spectrum `x exp(-x/T)` of an incident energy `E` with nuclear temperature `T`, restricted to
/// `[0, E - U]` by the restriction energy `U`.
#[derive(Clone, Debug, PartialEq)]
pub struct EvaporationDistribution {
    incident_energy: f64,
    nuclear_temperature: f64,
    restriction_energy: f64,
    norm: f64,
}

impl EvaporationDistribution {
    /// Constructor.
    pub fn new(
        incident_energy: f64,
        nuclear_temperature: f64,
        restriction_energy: f64,
    ) -> Result<Self> {
        require_positive("incident energy", incident_energy)?;
        require_positive("nuclear temperature", nuclear_temperature)?;
        require_finite("restriction energy", restriction_energy)?;

        if restriction_energy >= incident_energy {
            return Err(DistributionError::invalid(format!(
                "restriction energy {} must be smaller than the incident energy {}",
                restriction_energy, incident_energy
            )));
        }

        let y = (incident_energy - restriction_energy) / nuclear_temperature;

        // ∫_0^(E-U) x exp(-x/T) dx = T² γ(2, (E-U)/T)
        let gamma = if y < SERIES_LIMIT {
            special::lower_incomplete_gamma(2.0, y)
        } else {
            1.0 - (-y).exp() * (1.0 + y)
        };
        let norm = 1.0 / (nuclear_temperature * nuclear_temperature * gamma);

        if !(norm.is_finite() && norm > 0.0) {
            return Err(DistributionError::invalid(format!(
                "the spectrum for E = {}, T = {} and U = {} can not be normalized",
                incident_energy, nuclear_temperature, restriction_energy
            )));
        }

        Ok(Self {
            incident_energy,
            nuclear_temperature,
            restriction_energy,
            norm,
        })
    }

    /// The incident energy `E`.
    pub fn incident_energy(&self) -> f64 {
        self.incident_energy
    }

    /// The nuclear temperature `T`.
    pub fn nuclear_temperature(&self) -> f64 {
        self.nuclear_temperature
    }

    /// The restriction energy `U`.
    pub fn restriction_energy(&self) -> f64 {
        self.restriction_energy
    }

    /// The reciprocal of the integral of the spectrum over its domain.
    pub fn norm_constant(&self) -> f64 {
        self.norm
    }

    /// Draws a sample from the spectrum with the given parameters without constructing it.
    pub fn sample_with_parameters<R>(
        rng: &mut R,
        incident_energy: f64,
        nuclear_temperature: f64,
        restriction_energy: f64,
    ) -> f64
    where
        R: RandomSource + ?Sized,
    {
        let mut trials = 0;
        Self::sample_and_record_trials_with_parameters(
            rng,
            incident_energy,
            nuclear_temperature,
            restriction_energy,
            &mut trials,
        )
    }

    /// Like [`Self::sample_with_parameters`], adding the number of candidates to `trials`.
    ///
    /// A candidate `-T ln(r1 r2)` is the sum of two exponentially distributed energies, which
    /// follows `x exp(-x/T)` on an unrestricted domain; candidates above `E - U` are rejected. If
    /// `E <= U` zero is returned after a single trial.
    ///
    /// For `(E - U) / T` below one half candidates are `(E - U) sqrt(u)`, linear on the
    /// restricted domain, accepted if a second random number does not exceed `exp(-x/T)`.
    pub fn sample_and_record_trials_with_parameters<R>(
        rng: &mut R,
        incident_energy: f64,
        nuclear_temperature: f64,
        restriction_energy: f64,
        trials: &mut u64,
    ) -> f64
    where
        R: RandomSource + ?Sized,
    {
        let max = incident_energy - restriction_energy;

        if !(max > 0.0) {
            *trials += 1;
            return 0.0;
        }

        if max < BOUNDED_PROPOSAL_LIMIT * nuclear_temperature {
            loop {
                *trials += 1;

                let sample = max * rng.random_number().sqrt();

                if rng.random_number() <= (-sample / nuclear_temperature).exp() {
                    return sample;
                }
            }
        }

        loop {
            *trials += 1;

            let r1 = rng.random_number();
            let r2 = rng.random_number();

            let sample = -nuclear_temperature * (r1 * r2).ln();

            if sample <= max {
                return sample;
            }
        }
    }
}

impl OneDDistribution for EvaporationDistribution {
    fn evaluate(&self, x: f64) -> f64 {
        if x < 0.0 || x > self.upper_bound() {
            0.0
        } else {
            x * (-x / self.nuclear_temperature).exp()
        }
    }

    fn evaluate_pdf(&self, x: f64) -> f64 {
        self.evaluate(x) * self.norm
    }

    fn sample_and_record_trials<R>(&self, rng: &mut R, trials: &mut u64) -> f64
    where
        R: RandomSource + ?Sized,
    {
        Self::sample_and_record_trials_with_parameters(
            rng,
            self.incident_energy,
            self.nuclear_temperature,
            self.restriction_energy,
            trials,
        )
    }

    fn lower_bound(&self) -> f64 {
        0.0
    }

    fn upper_bound(&self) -> f64 {
        self.incident_energy - self.restriction_energy
    }

    fn distribution_type(&self) -> DistributionType {
        DistributionType::Evaporation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::FakeStream;
    use assert_approx_eq::assert_approx_eq;
    use rand_pcg::Pcg64;

    #[test]
    fn evaluate() {
        let dist = EvaporationDistribution::new(1.0, 1.0, 0.1).unwrap();

        assert_eq!(dist.evaluate(-0.5), 0.0);
        assert_eq!(dist.evaluate(0.0), 0.0);
        assert_approx_eq!(dist.evaluate(0.5), 0.5 * (-0.5_f64).exp(), 1e-15);
        assert_eq!(dist.evaluate(1.0), 0.0);
    }

    #[test]
    fn evaluate_pdf() {
        let dist = EvaporationDistribution::new(2.0, 0.5, 0.25).unwrap();

        // y = 3.5, ∫ = T² (1 - exp(-y)(1 + y))
        let y: f64 = 3.5;
        let integral = 0.25 * (1.0 - (-y).exp() * (1.0 + y));

        assert_approx_eq!(dist.norm_constant(), 1.0 / integral, 1e-13);
        assert_approx_eq!(dist.evaluate_pdf(1.0), (-2.0_f64).exp() / integral, 1e-13);
    }

    #[test]
    fn sample() {
        let dist = EvaporationDistribution::new(1.0, 1.0, 0.1).unwrap();
        let mut stream = FakeStream::new(vec![0.5, 0.6, 0.1, 0.2, 0.9, 0.8]).unwrap();
        let mut trials = 0;

        // -ln(0.3) and -ln(0.02) exceed 0.9, -ln(0.72) is accepted
        let sample = dist.sample_and_record_trials(&mut stream, &mut trials);
        assert_approx_eq!(sample, -(0.72_f64.ln()), 1e-15);
        assert_eq!(trials, 3);
        assert_eq!(stream.consumed(), 6);
    }

    #[test]
    fn sample_with_parameters() {
        let mut stream = FakeStream::new(vec![0.5, 0.8]).unwrap();

        let sample = EvaporationDistribution::sample_with_parameters(&mut stream, 3.0, 2.0, 0.5);
        assert_approx_eq!(sample, -2.0 * 0.4_f64.ln(), 1e-15);
    }

    #[test]
    fn sample_narrow_range() {
        let dist = EvaporationDistribution::new(1.0, 1.0, 0.8).unwrap();
        let mut stream = FakeStream::new(vec![0.3, 0.95, 0.6, 0.5]).unwrap();
        let mut trials = 0;

        // 0.2 sqrt(0.3) is rejected since exp(-0.1095) < 0.95
        let sample = dist.sample_and_record_trials(&mut stream, &mut trials);
        assert_approx_eq!(sample, 0.2 * 0.6_f64.sqrt(), 1e-15);
        assert_eq!(trials, 2);
        assert_eq!(stream.consumed(), 4);
    }

    #[test]
    fn sample_narrow_range_efficiently() {
        let dist = EvaporationDistribution::new(1.0, 1.0, 1.0 - 1e-4).unwrap();
        let mut rng = Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96);
        let mut trials = 0;

        for _ in 0..1000 {
            let sample = dist.sample_and_record_trials(&mut rng, &mut trials);
            assert!((0.0..=dist.upper_bound()).contains(&sample));
        }

        assert!(trials < 1010);
    }

    #[test]
    fn sample_mean_narrow_range() {
        let dist = EvaporationDistribution::new(1.0, 1.0, 0.8).unwrap();
        let mut rng = Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96);
        let samples = 100_000;

        let mean = (0..samples).map(|_| dist.sample(&mut rng)).sum::<f64>() / f64::from(samples);

        let expected =
            special::lower_incomplete_gamma(3.0, 0.2) / special::lower_incomplete_gamma(2.0, 0.2);
        assert_approx_eq!(mean, expected, 1e-3);
    }

    #[test]
    fn invalid_parameters() {
        assert!(EvaporationDistribution::new(-1.0, 1.0, 0.1).is_err());
        assert!(EvaporationDistribution::new(1.0, -1.0, 0.1).is_err());
        assert!(EvaporationDistribution::new(1.0, 1.0, 2.0).is_err());
        assert!(EvaporationDistribution::new(f64::INFINITY, 1.0, 0.1).is_err());
    }
}
