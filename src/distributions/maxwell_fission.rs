//! Maxwell fission spectrum.
use crate::core::error::{require_finite, require_positive, DistributionError, Result};
use crate::core::random::RandomSource;
use crate::core::special;
use crate::core::{DistributionType, OneDDistribution};
use std::f64::consts::PI;

/// Above this ratio of the energy range to the temperature the closed form is free of
/// cancellation and the series for the incomplete gamma function gets slow.
const SERIES_LIMIT: f64 = 30.0;

/// Below this ratio of the energy range to the temperature candidates are drawn on `[0, E - U]`.
const BOUNDED_PROPOSAL_LIMIT: f64 = 0.5;

/// The spectrum `sqrt(x) exp(-x/T)` of an incident energy `E` with nuclear temperature `T`,
/// restricted to `[0, E - U]` by the restriction energy `U`.
#[derive(Clone, Debug, PartialEq)]
pub struct MaxwellFissionDistribution {
    incident_energy: f64,
    nuclear_temperature: f64,
    restriction_energy: f64,
    norm: f64,
}

impl MaxwellFissionDistribution {
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

        // ∫_0^(E-U) sqrt(x) exp(-x/T) dx = T^(3/2) γ(3/2, (E-U)/T)
        let gamma = if y < SERIES_LIMIT {
            special::lower_incomplete_gamma(1.5, y)
        } else {
            0.5 * PI.sqrt() * (1.0 - special::erfc(y.sqrt())) - y.sqrt() * (-y).exp()
        };
        let norm = 1.0 / (nuclear_temperature.powf(1.5) * gamma);

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
    /// Every candidate consumes three random numbers `r1`, `r2` and `r3` and is
    /// `-T (ln r1 + ln r2 cos²(π r3 / 2))`, the sum of two independent energies drawn from the
    /// spectrum on an unrestricted domain. Candidates above `E - U` are rejected. If `E <= U`
    /// there is no energy to distribute and zero is returned after a single trial.
    ///
    /// When `(E - U) / T` is below one half almost every unrestricted candidate would be
    /// rejected. Candidates are then `(E - U) u^(2/3)`, distributed like `sqrt(x)` on the
    /// restricted domain, and are accepted if a second random number does not exceed
    /// `exp(-x/T)`.
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

                let sample = max * rng.random_number().powf(2.0 / 3.0);

                if rng.random_number() <= (-sample / nuclear_temperature).exp() {
                    return sample;
                }
            }
        }

        loop {
            *trials += 1;

            let r1 = rng.random_number();
            let r2 = rng.random_number();
            let r3 = rng.random_number();

            let cosine = (0.5 * PI * r3).cos();
            let sample = -nuclear_temperature * (r1.ln() + r2.ln() * cosine * cosine);

            if sample <= max {
                return sample;
            }
        }
    }
}

impl OneDDistribution for MaxwellFissionDistribution {
    fn evaluate(&self, x: f64) -> f64 {
        if x < 0.0 || x > self.upper_bound() {
            0.0
        } else {
            x.sqrt() * (-x / self.nuclear_temperature).exp()
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
        DistributionType::MaxwellFission
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
        let dist = MaxwellFissionDistribution::new(1.0, 1.0, 0.1).unwrap();

        assert_eq!(dist.evaluate(-1.0), 0.0);
        assert_eq!(dist.evaluate(0.0), 0.0);
        assert_approx_eq!(dist.evaluate(0.5), 0.5_f64.sqrt() * (-0.5_f64).exp(), 1e-15);
        assert_approx_eq!(dist.evaluate(0.9), 0.9_f64.sqrt() * (-0.9_f64).exp(), 1e-15);
        assert_eq!(dist.evaluate(0.95), 0.0);
    }

    #[test]
    fn evaluate_pdf() {
        let dist = MaxwellFissionDistribution::new(1.0, 1.0, 0.1).unwrap();

        assert_approx_eq!(dist.evaluate_pdf(0.9), 1.130_256_887_334_107_7, 1e-13);
        assert_eq!(dist.evaluate_pdf(1.0), 0.0);
    }

    #[test]
    fn sample() {
        let dist = MaxwellFissionDistribution::new(1.0, 1.0, 0.1).unwrap();
        let mut stream = FakeStream::new(vec![
            0.952_666_080_722_323_7,
            0.262_834_020_157_014_7,
            0.468_460_769_305_854_3,
            0.294_858_110_033_081_3,
            0.481_098_607_795_718_7,
            0.845_344_955_305_180_4,
            0.465_628_930_498_187_1,
            0.747_031_517_572_110_1,
            0.541_870_897_380_060_4,
        ])
        .unwrap();
        let mut trials = 0;

        let sample = dist.sample_and_record_trials(&mut stream, &mut trials);
        assert_approx_eq!(sample, 0.782_698_075_008_29, 1e-14);
        assert_eq!(trials, 1);

        let sample = dist.sample_and_record_trials(&mut stream, &mut trials);
        assert_approx_eq!(sample, 0.891_063_597_019_91, 1e-14);
        assert_eq!(trials, 3);
    }

    #[test]
    fn sample_with_parameters() {
        let mut stream = FakeStream::new(vec![
            0.132_499_806_333_613_7,
            0.924_799_693_425_203_3,
            0.191_851_490_081_141_8,
            0.306_264_086_710_559_4,
            0.875_483_968_742_393_3,
            0.227_430_029_818_548_2,
            0.933_696_738_566_344_1,
            0.245_901_894_482_950_7,
            0.477_087_320_241_401_9,
        ])
        .unwrap();

        let sample = MaxwellFissionDistribution::sample_with_parameters(&mut stream, 0.5, 0.1, 0.01);
        assert_approx_eq!(sample, 0.209_246_460_548_39, 1e-13);

        let sample =
            MaxwellFissionDistribution::sample_with_parameters(&mut stream, 0.75, 0.5, 0.25);
        assert_approx_eq!(sample, 0.410_230_255_681_20, 1e-13);
    }

    #[test]
    fn sample_narrow_range() {
        // (E - U) / T = 0.2 draws candidates 0.2 u^(2/3)
        let dist = MaxwellFissionDistribution::new(1.0, 1.0, 0.8).unwrap();
        let mut stream = FakeStream::new(vec![0.3, 0.95, 0.6, 0.5]).unwrap();
        let mut trials = 0;

        let sample = dist.sample_and_record_trials(&mut stream, &mut trials);
        assert_approx_eq!(sample, 0.2 * 0.6_f64.powf(2.0 / 3.0), 1e-15);
        assert_eq!(trials, 2);
        assert_eq!(stream.consumed(), 4);
    }

    #[test]
    fn sample_narrow_range_efficiently() {
        let dist = MaxwellFissionDistribution::new(1.0, 1.0, 1.0 - 1e-4).unwrap();
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
        let dist = MaxwellFissionDistribution::new(1.0, 1.0, 0.8).unwrap();
        let mut rng = Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96);
        let samples = 100_000;

        let mean = (0..samples).map(|_| dist.sample(&mut rng)).sum::<f64>() / f64::from(samples);

        // ∫ x sqrt(x) exp(-x/T) / ∫ sqrt(x) exp(-x/T) = T γ(5/2, y) / γ(3/2, y)
        let expected =
            special::lower_incomplete_gamma(2.5, 0.2) / special::lower_incomplete_gamma(1.5, 0.2);
        assert_approx_eq!(mean, expected, 1e-3);
    }

    #[test]
    fn no_energy_available() {
        let mut stream = FakeStream::new(vec![0.5]).unwrap();
        let mut trials = 0;

        let sample = MaxwellFissionDistribution::sample_and_record_trials_with_parameters(
            &mut stream,
            1.0,
            1.0,
            1.0,
            &mut trials,
        );

        assert_eq!(sample, 0.0);
        assert_eq!(trials, 1);
        assert_eq!(stream.consumed(), 0);
    }

    #[test]
    fn normalization_for_large_ranges() {
        let dist = MaxwellFissionDistribution::new(100.0, 1.0, 0.0).unwrap();

        // γ(3/2, ∞) = √π/2
        assert_approx_eq!(dist.norm_constant(), 2.0 / PI.sqrt(), 1e-12);
    }

    #[test]
    fn invalid_parameters() {
        assert!(MaxwellFissionDistribution::new(0.0, 1.0, -1.0).is_err());
        assert!(MaxwellFissionDistribution::new(1.0, 0.0, 0.1).is_err());
        assert!(MaxwellFissionDistribution::new(1.0, 1.0, 1.0).is_err());
        assert!(MaxwellFissionDistribution::new(1.0, f64::NAN, 0.1).is_err());
        assert!(MaxwellFissionDistribution::new(1.0, 1.0, f64::NEG_INFINITY).is_err());
    }
}
