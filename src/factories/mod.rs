//! Builders that turn the flat arrays of ACE tables into distributions.
//!
//! The arrays are handed over exactly as they appear in the table, together with the name of the
//! table. Every error raised while building is tagged with that name, see
//! [`DistributionError::in_table`](crate::core::DistributionError::in_table).
pub mod elastic;
pub mod energy;
pub mod multiplicity;

pub use crate::factories::elastic::{create_elastic_distribution, ElasticTable};
pub use crate::factories::energy::{create_energy_law, EnergyLaw, ScatteringEnergyLaw};
pub use crate::factories::multiplicity::{
    create_fission_multiplicity, FissionMultiplicity, NuBar,
};

use crate::core::error::{require_finite, DistributionError, Result};
use crate::core::search;
use crate::core::Interpolation;

/// A parameter tabulated as a function of the incident energy.
///
/// Values are interpolated linearly between grid points and clamped to the first or last value
/// outside of the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterTable {
    energies: Vec<f64>,
    values: Vec<f64>,
}

impl ParameterTable {
    /// Constructor. Needs at least one point and non-decreasing, finite energies.
    pub fn new(energies: &[f64], values: &[f64]) -> Result<Self> {
        if energies.is_empty() || energies.len() != values.len() {
            return Err(DistributionError::invalid(format!(
                "expected the same non-zero number of energies and values, got {} and {}",
                energies.len(),
                values.len()
            )));
        }

        for (&energy, &value) in energies.iter().zip(values) {
            require_finite("tabulated energy", energy)?;
            require_finite("tabulated parameter", value)?;
        }

        if energies.windows(2).any(|w| w[1] < w[0]) {
            return Err(DistributionError::invalid(
                "the energies of a parameter table must not decrease",
            ));
        }

        Ok(Self {
            energies: energies.to_vec(),
            values: values.to_vec(),
        })
    }

    /// The incident energy grid.
    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    /// The tabulated values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The parameter at `energy`.
    pub fn evaluate(&self, energy: f64) -> f64 {
        let last = self.energies.len() - 1;

        if !(energy > self.energies[0]) {
            return self.values[0];
        }

        if energy >= self.energies[last] {
            return self.values[last];
        }

        let i = search::bracket(&self.energies, &energy);
        let (x0, x1) = (self.energies[i], self.energies[i + 1]);
        let (y0, y1) = (self.values[i], self.values[i + 1]);

        Interpolation::LinLin.interpolate(x0, x1, energy, y0, y1)
    }
}

/// Reads a single entry.
pub(crate) fn entry(array: &[f64], index: usize, what: &str) -> Result<f64> {
    array.get(index).copied().ok_or_else(|| {
        DistributionError::invalid(format!(
            "the array of length {} ends before the {} at index {}",
            array.len(),
            what,
            index
        ))
    })
}

/// Reads `len` consecutive entries.
pub(crate) fn entries<'a>(
    array: &'a [f64],
    start: usize,
    len: usize,
    what: &str,
) -> Result<&'a [f64]> {
    array.get(start..start + len).ok_or_else(|| {
        DistributionError::invalid(format!(
            "the array of length {} ends before the {} {} entries starting at index {}",
            array.len(),
            len,
            what,
            start
        ))
    })
}

/// Reads an entry that stores a count or a flag.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn integer(array: &[f64], index: usize, what: &str) -> Result<i64> {
    let value = entry(array, index, what)?;

    if value.is_finite() && value.fract() == 0.0 && value.abs() < 2.0_f64.powi(53) {
        Ok(value as i64)
    } else {
        Err(DistributionError::invalid(format!(
            "the {} at index {} must be an integer, got {}",
            what, index, value
        )))
    }
}

/// Reads an entry that stores the length of the block that follows.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub(crate) fn count(array: &[f64], index: usize, what: &str) -> Result<usize> {
    let value = integer(array, index, what)?;

    if value >= 0 && value <= array.len() as i64 {
        Ok(value as usize)
    } else {
        Err(DistributionError::invalid(format!(
            "the {} at index {} is out of range: {}",
            what, index, value
        )))
    }
}

/// Reads a one-based locator pointing into the array that starts at the one-based index `start`,
/// and returns it as a zero-based index into that array.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub(crate) fn locator(array: &[f64], index: usize, start: usize, what: &str) -> Result<usize> {
    let value = integer(array, index, what)?;
    let relative = value - start as i64 - 1;

    if relative >= 0 && (relative as usize) < array.len() {
        Ok(relative as usize)
    } else {
        Err(DistributionError::invalid(format!(
            "the {} {} does not point into the block starting at {}",
            what, value, start
        )))
    }
}

/// Fails with `UnsupportedFormat` if the number of interpolation regions at `index` is not zero.
pub(crate) fn require_single_region(array: &[f64], index: usize) -> Result<()> {
    let regions = integer(array, index, "number of interpolation regions")?;

    if regions == 0 {
        Ok(())
    } else {
        Err(DistributionError::unsupported(format!(
            "{} interpolation regions, only a single lin-lin region is supported",
            regions
        )))
    }
}

/// Reads the common `NE, E[NE], θ[NE]` block that starts at `start`.
pub(crate) fn parameter_table(array: &[f64], start: usize, what: &str) -> Result<ParameterTable> {
    let len = count(array, start, "number of incident energies")?;
    let energies = entries(array, start + 1, len, "incident energies")?;
    let values = entries(array, start + 1 + len, len, what)?;

    ParameterTable::new(energies, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn parameter_table_clamps() {
        let table = ParameterTable::new(&[1.0, 2.0, 4.0], &[1.0, 3.0, 2.0]).unwrap();

        assert_eq!(table.evaluate(0.5), 1.0);
        assert_eq!(table.evaluate(1.0), 1.0);
        assert_approx_eq!(table.evaluate(1.5), 2.0);
        assert_approx_eq!(table.evaluate(3.0), 2.5);
        assert_eq!(table.evaluate(4.0), 2.0);
        assert_eq!(table.evaluate(100.0), 2.0);

        let single = ParameterTable::new(&[1.0], &[7.0]).unwrap();
        assert_eq!(single.evaluate(0.0), 7.0);
        assert_eq!(single.evaluate(9.0), 7.0);
    }

    #[test]
    fn invalid_parameter_tables() {
        assert!(ParameterTable::new(&[], &[]).is_err());
        assert!(ParameterTable::new(&[1.0, 2.0], &[1.0]).is_err());
        assert!(ParameterTable::new(&[2.0, 1.0], &[1.0, 1.0]).is_err());
        assert!(ParameterTable::new(&[1.0, f64::NAN], &[1.0, 1.0]).is_err());
    }

    #[test]
    fn readers() {
        let array = [0.0, 2.0, 1.0, 2.0, 5.0, 6.0, 1.5];

        assert_eq!(entry(&array, 6, "value").unwrap(), 1.5);
        assert!(entry(&array, 7, "value").unwrap_err().is_invalid_parameter());
        assert_eq!(entries(&array, 2, 2, "values").unwrap(), &[1.0, 2.0]);
        assert!(entries(&array, 6, 2, "values").is_err());
        assert_eq!(count(&array, 1, "count").unwrap(), 2);
        assert!(integer(&array, 6, "count").is_err());
        assert_eq!(locator(&array, 4, 1, "locator").unwrap(), 3);
        assert!(locator(&array, 4, 5, "locator").is_err());
        assert!(require_single_region(&array, 0).is_ok());
        assert!(require_single_region(&array, 2)
            .unwrap_err()
            .is_unsupported_format());

        let table = parameter_table(&array, 1, "values").unwrap();
        assert_eq!(table.energies(), &[1.0, 2.0]);
        assert_eq!(table.values(), &[5.0, 6.0]);
    }
}
