//! Average number of neutrons emitted per fission.
//!
//! The `NU` block holds either the total `ν̄` alone, or, if its first entry `KNU` is negative, a
//! prompt block of `|KNU|` entries followed by the total block. The `DNU` block holds the delayed
//! `ν̄` and may be empty. Every block starts with the flag `LNU`:
//!
//! - `LNU = 1`: `NC, C[NC]`, the polynomial `ν̄(E) = Σ C[i] Eⁱ`,
//! - `LNU = 2`: `NR, NE, E[NE], ν̄[NE]`, a lin-lin table that clamps outside of its grid.
use crate::core::error::{require_finite, DistributionError, Result};
use crate::core::random::RandomSource;
use crate::factories::{
    count, entries, integer, parameter_table, require_single_region, ParameterTable,
};
use std::convert::TryFrom;

/// A tabulated or polynomial `ν̄(E)`.
#[derive(Clone, Debug, PartialEq)]
pub enum NuBar {
    /// Coefficients of increasing powers of the incident energy.
    Polynomial(Vec<f64>),
    /// Linearly interpolated values.
    Tabular(ParameterTable),
}

impl NuBar {
    /// Evaluates `ν̄` at `energy`.
    pub fn evaluate(&self, energy: f64) -> f64 {
        match self {
            Self::Polynomial(coefficients) => coefficients
                .iter()
                .rev()
                .fold(0.0, |sum, &c| sum * energy + c),
            Self::Tabular(table) => table.evaluate(energy),
        }
    }
}

/// The combination of `ν̄` blocks present in a table.
#[derive(Clone, Debug, PartialEq)]
pub enum FissionMultiplicity {
    /// Total `ν̄` only. All neutrons are treated as prompt.
    Total {
        /// Total `ν̄`.
        total: NuBar,
    },
    /// Prompt and total `ν̄`. The delayed `ν̄` is their difference.
    PromptTotal {
        /// Prompt `ν̄`.
        prompt: NuBar,
        /// Total `ν̄`.
        total: NuBar,
    },
    /// Delayed and total `ν̄`. The prompt `ν̄` is their difference.
    DelayedTotal {
        /// Delayed `ν̄`.
        delayed: NuBar,
        /// Total `ν̄`.
        total: NuBar,
    },
    /// All three blocks.
    PromptDelayedTotal {
        /// Prompt `ν̄`.
        prompt: NuBar,
        /// Delayed `ν̄`.
        delayed: NuBar,
        /// Total `ν̄`.
        total: NuBar,
    },
}

impl FissionMultiplicity {
    /// Total `ν̄` at `energy`.
    pub fn total_nu_bar(&self, energy: f64) -> f64 {
        match self {
            Self::Total { total }
            | Self::PromptTotal { total, .. }
            | Self::DelayedTotal { total, .. }
            | Self::PromptDelayedTotal { total, .. } => total.evaluate(energy),
        }
    }

    /// Prompt `ν̄` at `energy`.
    pub fn prompt_nu_bar(&self, energy: f64) -> f64 {
        match self {
            Self::Total { total } => total.evaluate(energy),
            Self::PromptTotal { prompt, .. } | Self::PromptDelayedTotal { prompt, .. } => {
                prompt.evaluate(energy)
            }
            Self::DelayedTotal { delayed, total } => {
                (total.evaluate(energy) - delayed.evaluate(energy)).max(0.0)
            }
        }
    }

    /// Delayed `ν̄` at `energy`.
    pub fn delayed_nu_bar(&self, energy: f64) -> f64 {
        match self {
            Self::Total { .. } => 0.0,
            Self::PromptTotal { prompt, total } => {
                (total.evaluate(energy) - prompt.evaluate(energy)).max(0.0)
            }
            Self::DelayedTotal { delayed, .. } | Self::PromptDelayedTotal { delayed, .. } => {
                delayed.evaluate(energy)
            }
        }
    }

    /// Samples the number of neutrons emitted by a fission at `energy`: `⌊ν̄⌋ + 1` with
    /// probability equal to the fractional part of `ν̄`, and `⌊ν̄⌋` otherwise.
    pub fn sample_number_of_neutrons<R>(&self, rng: &mut R, energy: f64) -> u32
    where
        R: RandomSource + ?Sized,
    {
        sample_integer(rng, self.total_nu_bar(energy))
    }

    /// Like [`Self::sample_number_of_neutrons`] for the prompt neutrons only.
    pub fn sample_number_of_prompt_neutrons<R>(&self, rng: &mut R, energy: f64) -> u32
    where
        R: RandomSource + ?Sized,
    {
        sample_integer(rng, self.prompt_nu_bar(energy))
    }

    /// Like [`Self::sample_number_of_neutrons`] for the delayed neutrons only.
    pub fn sample_number_of_delayed_neutrons<R>(&self, rng: &mut R, energy: f64) -> u32
    where
        R: RandomSource + ?Sized,
    {
        sample_integer(rng, self.delayed_nu_bar(energy))
    }

    fn blocks(&self) -> &'static str {
        match self {
            Self::Total { .. } => "total nu-bar",
            Self::PromptTotal { .. } => "prompt and total nu-bar",
            Self::DelayedTotal { .. } => "delayed and total nu-bar",
            Self::PromptDelayedTotal { .. } => "prompt, delayed and total nu-bar",
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sample_integer<R>(rng: &mut R, nu_bar: f64) -> u32
where
    R: RandomSource + ?Sized,
{
    let u = rng.random_number();
    let nu_bar = nu_bar.max(0.0);
    let floor = nu_bar.floor();

    if u < nu_bar - floor {
        floor as u32 + 1
    } else {
        floor as u32
    }
}

/// Builds the fission multiplicity of the table `table_name` from its `NU` and `DNU` blocks.
///
/// Fails with `UnsupportedFormat` for unknown `LNU` flags, for interpolation regions other than a
/// single lin-lin one and for a polynomial delayed `ν̄`.
pub fn create_fission_multiplicity(
    table_name: &str,
    nu: &[f64],
    dnu: &[f64],
) -> Result<FissionMultiplicity> {
    match build_fission_multiplicity(nu, dnu) {
        Ok(multiplicity) => {
            tracing::debug!(
                "created fission multiplicity from {} for table '{}'",
                multiplicity.blocks(),
                table_name
            );
            Ok(multiplicity)
        }
        Err(error) => {
            tracing::warn!("no fission multiplicity for table '{}': {}", table_name, error);
            Err(error.in_table(table_name))
        }
    }
}

fn build_fission_multiplicity(nu: &[f64], dnu: &[f64]) -> Result<FissionMultiplicity> {
    if nu.is_empty() {
        return Err(DistributionError::invalid(
            "the total nu-bar block is missing",
        ));
    }

    let knu = integer(nu, 0, "prompt block length or LNU flag")?;

    let (prompt, total) = if knu < 0 {
        let len = usize::try_from(-knu).map_err(|_| {
            DistributionError::invalid(format!("prompt block length {} is out of range", -knu))
        })?;
        let prompt = entries(nu, 1, len, "prompt nu-bar block")?;

        (Some(nu_bar(prompt)?), nu_bar(&nu[1 + len..])?)
    } else {
        (None, nu_bar(nu)?)
    };

    let delayed = if dnu.is_empty() {
        None
    } else {
        match nu_bar(dnu)? {
            tabular @ NuBar::Tabular(_) => Some(tabular),
            NuBar::Polynomial(_) => {
                return Err(DistributionError::unsupported(
                    "the delayed nu-bar must be tabulated",
                ))
            }
        }
    };

    Ok(match (prompt, delayed) {
        (None, None) => FissionMultiplicity::Total { total },
        (Some(prompt), None) => FissionMultiplicity::PromptTotal { prompt, total },
        (None, Some(delayed)) => FissionMultiplicity::DelayedTotal { delayed, total },
        (Some(prompt), Some(delayed)) => FissionMultiplicity::PromptDelayedTotal {
            prompt,
            delayed,
            total,
        },
    })
}

fn nu_bar(block: &[f64]) -> Result<NuBar> {
    match integer(block, 0, "LNU flag")? {
        1 => {
            let len = count(block, 1, "number of coefficients")?;

            if len == 0 {
                return Err(DistributionError::invalid(
                    "a polynomial nu-bar needs at least one coefficient",
                ));
            }

            let coefficients = entries(block, 2, len, "nu-bar coefficients")?;

            for &c in coefficients {
                require_finite("nu-bar coefficient", c)?;
            }

            Ok(NuBar::Polynomial(coefficients.to_vec()))
        }
        2 => {
            require_single_region(block, 1)?;
            parameter_table(block, 2, "nu-bar values").map(NuBar::Tabular)
        }
        other => Err(DistributionError::unsupported(format!(
            "nu-bar flag LNU = {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::FakeStream;
    use crate::core::OneDDistribution;
    use crate::distributions::PolynomialDistribution;
    use assert_approx_eq::assert_approx_eq;

    const PROMPT: [f64; 4] = [1.0, 2.0, 2.4, 0.1];
    const TOTAL: [f64; 7] = [2.0, 0.0, 2.0, 1.0, 3.0, 2.5, 3.0];
    const DELAYED: [f64; 7] = [2.0, 0.0, 2.0, 1.0, 3.0, 0.01, 0.02];

    fn prompt_and_total() -> Vec<f64> {
        let mut nu = vec![-4.0];
        nu.extend_from_slice(&PROMPT);
        nu.extend_from_slice(&TOTAL);
        nu
    }

    #[test]
    fn total_only() {
        let multiplicity = create_fission_multiplicity("test", &[1.0, 2.0, 2.5, 0.1], &[]).unwrap();

        assert!(matches!(multiplicity, FissionMultiplicity::Total { .. }));
        assert_approx_eq!(multiplicity.total_nu_bar(2.0), 2.7);
        assert_approx_eq!(multiplicity.prompt_nu_bar(2.0), 2.7);
        assert_eq!(multiplicity.delayed_nu_bar(2.0), 0.0);

        let mut stream = FakeStream::new(vec![0.5, 0.8]).unwrap();
        assert_eq!(multiplicity.sample_number_of_neutrons(&mut stream, 2.0), 3);
        assert_eq!(multiplicity.sample_number_of_neutrons(&mut stream, 2.0), 2);
    }

    #[test]
    fn prompt_total() {
        let multiplicity = create_fission_multiplicity("test", &prompt_and_total(), &[]).unwrap();

        assert!(matches!(multiplicity, FissionMultiplicity::PromptTotal { .. }));
        assert_approx_eq!(multiplicity.total_nu_bar(2.0), 2.75);
        assert_approx_eq!(multiplicity.prompt_nu_bar(2.0), 2.6);
        assert_approx_eq!(multiplicity.delayed_nu_bar(2.0), 0.15);

        // clamped table, growing polynomial
        assert_approx_eq!(multiplicity.total_nu_bar(10.0), 3.0);
        assert_eq!(multiplicity.delayed_nu_bar(10.0), 0.0);
    }

    #[test]
    fn delayed_total() {
        let multiplicity = create_fission_multiplicity("test", &TOTAL, &DELAYED).unwrap();

        assert!(matches!(multiplicity, FissionMultiplicity::DelayedTotal { .. }));
        assert_approx_eq!(multiplicity.delayed_nu_bar(2.0), 0.015);
        assert_approx_eq!(multiplicity.prompt_nu_bar(2.0), 2.735);
        assert_approx_eq!(multiplicity.total_nu_bar(0.5), 2.5);

        let mut stream = FakeStream::new(vec![0.01, 0.02]).unwrap();
        assert_eq!(multiplicity.sample_number_of_delayed_neutrons(&mut stream, 2.0), 1);
        assert_eq!(multiplicity.sample_number_of_delayed_neutrons(&mut stream, 2.0), 0);
    }

    #[test]
    fn prompt_delayed_total() {
        let multiplicity =
            create_fission_multiplicity("test", &prompt_and_total(), &DELAYED).unwrap();

        assert!(matches!(
            multiplicity,
            FissionMultiplicity::PromptDelayedTotal { .. }
        ));
        assert_approx_eq!(multiplicity.prompt_nu_bar(2.0), 2.6);
        assert_approx_eq!(multiplicity.delayed_nu_bar(2.0), 0.015);
        assert_approx_eq!(multiplicity.total_nu_bar(2.0), 2.75);

        let mut stream = FakeStream::new(vec![0.7]).unwrap();
        assert_eq!(multiplicity.sample_number_of_prompt_neutrons(&mut stream, 2.0), 2);
    }

    #[test]
    fn polynomial_nu_bar_matches_polynomial_distribution() {
        let coefficients = [2.4, 0.1, 0.003];
        let nu_bar = NuBar::Polynomial(coefficients.to_vec());
        let polynomial = PolynomialDistribution::new(&coefficients, 0.0, 20.0).unwrap();

        for &energy in &[0.0, 1e-5, 0.7, 2.0, 14.1, 20.0] {
            assert_eq!(nu_bar.evaluate(energy), polynomial.evaluate(energy));
        }
    }

    #[test]
    fn unsupported_formats() {
        let error = create_fission_multiplicity("92235.70c", &[3.0, 1.0, 2.0], &[]).unwrap_err();
        assert!(error.is_unsupported_format());
        assert!(matches!(
            &error,
            DistributionError::Table { table_name, .. } if table_name == "92235.70c"
        ));

        let regions = [2.0, 1.0, 2.0, 2.0, 2.0, 1.0, 3.0, 2.5, 3.0];
        assert!(create_fission_multiplicity("test", &regions, &[])
            .unwrap_err()
            .is_unsupported_format());

        assert!(create_fission_multiplicity("test", &TOTAL, &[1.0, 1.0, 0.01])
            .unwrap_err()
            .is_unsupported_format());
    }

    #[test]
    fn invalid_blocks() {
        assert!(create_fission_multiplicity("test", &[], &DELAYED)
            .unwrap_err()
            .is_invalid_parameter());
        assert!(create_fission_multiplicity("test", &[1.0, 3.0, 2.5], &[])
            .unwrap_err()
            .is_invalid_parameter());
        assert!(create_fission_multiplicity("test", &[1.0, 0.0], &[])
            .unwrap_err()
            .is_invalid_parameter());
        assert!(create_fission_multiplicity("test", &[-9.0, 1.0, 1.0, 2.5], &[])
            .unwrap_err()
            .is_invalid_parameter());
    }
}
