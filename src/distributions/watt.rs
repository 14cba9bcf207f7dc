//! Watt fission spectrum.
use crate::core::error::{require_finite, require_positive, DistributionError, Result};
use crate::core::random::RandomSource;
use crate::core::special;
use crate::core::{DistributionType, OneDDistribution};
use crate::distributions::MaxwellFissionDistribution;
use std::f64::consts::{LN_10, PI};

/// The spectrum `exp(-x/a) sinh(sqrt(b x))` of an incident energy `E`, sampled on `[0, E - U]`.
///
/// [`OneDDistribution::evaluate`] returns the shape for every non-negative `x`, while the
/// normalized density is restricted to the sampling domain.
#[derive(Clone, Debug, PartialEq)]
pub struct WattDistribution {
    incident_energy: f64,
    a_parameter: f64,
    b_parameter: f64,
    restriction_energy: f64,
    norm: f64,
}

impl WattDistribution {
    /// Constructor.
    pub fn new(
        incident_energy: f64,
        a_parameter: f64,
        b_parameter: f64,
        restriction_energy: f64,
    ) -> Result<Self> {
        require_positive("incident energy", incident_energy)?;
        require_positive("a parameter", a_parameter)?;
        require_positive("b parameter", b_parameter)?;
        require_finite("restriction energy", restriction_energy)?;

        if restriction_energy >= incident_energy {
            return Err(DistributionError::invalid(format!(
                "restriction energy {} must be smaller than the incident energy {}",
                restriction_energy, incident_energy
            )));
        }

        let max = incident_energy - restriction_energy;
        let a = a_parameter;
        let b = b_parameter;

        let sqrt_ab_4 = (0.25 * a * b).sqrt();
        let sqrt_max_a = (max / a).sqrt();

        let integral = 0.5
            * (0.25 * a * b).exp()
            * (special::erf(sqrt_max_a - sqrt_ab_4) + special::erf(sqrt_max_a + sqrt_ab_4))
            * (0.25 * PI * a * a * a * b).sqrt()
            - a * (-max / a).exp() * (b * max).sqrt().sinh();
        let norm = 1.0 / integral;

        if !(norm.is_finite() && norm > 0.0) {
            return Err(DistributionError::invalid(format!(
                "the spectrum for E = {}, a = {}, b = {} and U = {} can not be normalized",
                incident_energy, a_parameter, b_parameter, restriction_energy
            )));
        }

        Ok(Self {
            incident_energy,
            a_parameter,
            b_parameter,
            restriction_energy,
            norm,
        })
    }

    /// The incident energy `E`.
    pub fn incident_energy(&self) -> f64 {
        self.incident_energy
    }

    /// The `a` parameter.
    pub fn a_parameter(&self) -> f64 {
        self.a_parameter
    }

    /// The `b` parameter.
    pub fn b_parameter(&self) -> f64 {
        self.b_parameter
    }

    /// The restriction energy `U`.
    pub fn restriction_energy(&self) -> f64 {
        self.restriction_energy
    }

    /// The reciprocal of the integral of the spectrum over `[0, E - U]`.
    pub fn norm_constant(&self) -> f64 {
        self.norm
    }

    /// Draws a sample from the spectrum with the given parameters without constructing it.
    pub fn sample_with_parameters<R>(
        rng: &mut R,
        incident_energy: f64,
        a_parameter: f64,
        b_parameter: f64,
        restriction_energy: f64,
    ) -> f64
    where
        R: RandomSource + ?Sized,
    {
        let mut trials = 0;
        Self::sample_and_record_trials_with_parameters(
            rng,
            incident_energy,
            a_parameter,
            b_parameter,
            restriction_energy,
            &mut trials,
        )
    }

    /// Like [`Self::sample_with_parameters`], adding the number of candidates to `trials`.
    ///
    /// The first of two schemes is used unless its envelope is more than ten times the envelope
    /// of the second:
    ///
    /// - an unrestricted Maxwell energy `m` with temperature `a`, drawn from three random numbers,
    ///   is shifted to `m + a²b/4 + (2u - 1) sqrt(a²b m)` with a fourth uniform `u`. Candidates
    ///   above `E - U` are rejected and every candidate counts as one trial.
    /// - a Maxwell energy `m` with temperature `a` restricted to `[0, E - U]` is accepted with
    ///   probability `g(m) / g(E - U)` where `g(x) = sinh(sqrt(b x)) / sqrt(b x)`. The trials of
    ///   the restricted Maxwell draws are counted.
    pub fn sample_and_record_trials_with_parameters<R>(
        rng: &mut R,
        incident_energy: f64,
        a_parameter: f64,
        b_parameter: f64,
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

        if shift_is_efficient(max, a_parameter, b_parameter) {
            let a2b = a_parameter * a_parameter * b_parameter;

            loop {
                *trials += 1;

                let r1 = rng.random_number();
                let r2 = rng.random_number();
                let r3 = rng.random_number();

                let cosine = (0.5 * PI * r3).cos();
                let maxwell = -a_parameter * (r1.ln() + r2.ln() * cosine * cosine);
                let u = rng.random_number();

                let sample = maxwell + 0.25 * a2b + (2.0 * u - 1.0) * (a2b * maxwell).sqrt();

                if sample <= max {
                    return sample;
                }
            }
        }

        let ln_g_max = ln_sinh_ratio((b_parameter * max).sqrt());

        loop {
            let maxwell = MaxwellFissionDistribution::sample_and_record_trials_with_parameters(
                rng,
                max,
                a_parameter,
                0.0,
                trials,
            );

            if rng.random_number().ln() <= ln_sinh_ratio((b_parameter * maxwell).sqrt()) - ln_g_max
            {
                return maxwell;
            }
        }
    }
}

/// `ln(sinh(s) / s)` for `s >= 0`.
fn ln_sinh_ratio(s: f64) -> f64 {
    if s < 1e-8 {
        0.0
    } else {
        s + (-0.5 * (-2.0 * s).exp_m1()).ln() - s.ln()
    }
}

/// Compares the envelopes of both sampling schemes in logarithms. The shifted Maxwell draw covers
/// the unrestricted spectrum `sqrt(π a³ b / 4) exp(a b / 4)`, the restricted one
/// `sinh(sqrt(b max)) / sqrt(max) a^(3/2) γ(3/2, max / a)`.
fn shift_is_efficient(max: f64, a: f64, b: f64) -> bool {
    let y = max / a;
    let gamma = if y < 30.0 {
        special::lower_incomplete_gamma(1.5, y)
    } else {
        0.5 * PI.sqrt()
    };

    let shifted = 0.5 * (0.25 * PI * a * a * a * b).ln() + 0.25 * a * b;
    let restricted = ln_sinh_ratio((b * max).sqrt()) + 0.5 * b.ln() + 1.5 * a.ln() + gamma.ln();

    shifted - restricted <= LN_10
}

impl OneDDistribution for WattDistribution {
    fn evaluate(&self, x: f64) -> f64 {
        if x < 0.0 {
            0.0
        } else {
            (-x / self.a_parameter).exp() * (self.b_parameter * x).sqrt().sinh()
        }
    }

    fn evaluate_pdf(&self, x: f64) -> f64 {
        if x > self.upper_bound() {
            0.0
        } else {
            self.evaluate(x) * self.norm
        }
    }

    fn sample_and_record_trials<R>(&self, rng: &mut R, trials: &mut u64) -> f64
    where
        R: RandomSource + ?Sized,
    {
        Self::sample_and_record_trials_with_parameters(
            rng,
            self.incident_energy,
            self.a_parameter,
            self.b_parameter,
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
        DistributionType::Watt
    }
}
