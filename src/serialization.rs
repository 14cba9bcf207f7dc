//! Serialization of distributions through plain parameter records.
//!
//! Distributions themselves are not serializable; instead every family converts into a
//! [`DistributionRecord`] holding exactly the parameters its constructor takes. Turning a record
//! back into a distribution runs the constructor again, so a record read from disk is validated
//! like any other input.
//!
//! ```
//! use transport_distributions::distributions::WattDistribution;
//! use transport_distributions::serialization::DistributionRecord;
//! use std::convert::TryFrom;
//!
//! let watt = WattDistribution::new(1.0, 1.0, 1.0, 0.1).unwrap();
//! let json = DistributionRecord::from(&watt).to_json().unwrap();
//! let record = DistributionRecord::from_json(&json).unwrap();
//!
//! assert_eq!(WattDistribution::try_from(record).unwrap(), watt);
//! ```
use crate::core::error::{DistributionError, Result};
use crate::core::{DistributionType, Interpolation, OneDDistribution};
use crate::distributions::{
    AnalogElasticDistribution, CutoffElasticDistribution, ElasticDistribution,
    EvaporationDistribution, HybridElasticDistribution, MaxwellFissionDistribution,
    PolynomialDistribution, TabularDistribution, WattDistribution,
};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// The grid of a tabulated distribution.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TableRecord {
    /// Independent values.
    pub indep: Vec<f64>,
    /// Dependent values.
    pub dep: Vec<f64>,
    /// Interpolation policy.
    #[serde(default)]
    pub interpolation: Interpolation,
}

impl From<&TabularDistribution> for TableRecord {
    fn from(table: &TabularDistribution) -> Self {
        Self {
            indep: table.indep_values().to_vec(),
            dep: table.dep_values().to_vec(),
            interpolation: table.interpolation(),
        }
    }
}

impl TryFrom<TableRecord> for TabularDistribution {
    type Error = DistributionError;

    fn try_from(record: TableRecord) -> Result<Self> {
        Self::new(&record.indep, &record.dep, record.interpolation)
    }
}

/// The constructor parameters of any distribution in this crate, tagged with its family.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum DistributionRecord {
    /// See [`TabularDistribution::new`].
    Tabular(TableRecord),
    /// See [`PolynomialDistribution::new`].
    Polynomial {
        /// Coefficients of increasing powers.
        coefficients: Vec<f64>,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// See [`EvaporationDistribution::new`].
    Evaporation {
        /// Incident energy `E`.
        incident_energy: f64,
        /// Nuclear temperature `T`.
        nuclear_temperature: f64,
        /// Restriction energy `U`.
        restriction_energy: f64,
    },
    /// See [`MaxwellFissionDistribution::new`].
    MaxwellFission {
        /// Incident energy `E`.
        incident_energy: f64,
        /// Nuclear temperature `T`.
        nuclear_temperature: f64,
        /// Restriction energy `U`.
        restriction_energy: f64,
    },
    /// See [`WattDistribution::new`].
    Watt {
        /// Incident energy `E`.
        incident_energy: f64,
        /// The `a` parameter.
        a_parameter: f64,
        /// The `b` parameter.
        b_parameter: f64,
        /// Restriction energy `U`.
        restriction_energy: f64,
    },
    /// See [`CutoffElasticDistribution::new`].
    CutoffElastic {
        /// Angular table.
        table: TableRecord,
        /// Cutoff cosine `μc`.
        cutoff_cosine: f64,
        /// Cutoff cross-section ratio.
        cutoff_cross_section_ratio: f64,
    },
    /// See [`HybridElasticDistribution::new`].
    HybridElastic {
        /// Angular table.
        table: TableRecord,
        /// Cutoff cosine `μc`.
        cutoff_cosine: f64,
        /// Cutoff cross-section ratio.
        cutoff_cross_section_ratio: f64,
        /// Discrete angles above the cutoff cosine.
        discrete_angles: Vec<f64>,
        /// Cumulative weights of the discrete angles.
        cumulative_weights: Vec<f64>,
    },
    /// See [`AnalogElasticDistribution::new`].
    AnalogElastic {
        /// Angular table.
        table: TableRecord,
        /// Cutoff cosine `μc`.
        cutoff_cosine: f64,
        /// Cutoff cross-section ratio.
        cutoff_cross_section_ratio: f64,
        /// Moliere screening constant.
        screening_parameter: f64,
    },
}

impl DistributionRecord {
    /// The family of the recorded distribution.
    pub fn distribution_type(&self) -> DistributionType {
        match self {
            Self::Tabular(_) => DistributionType::Tabular,
            Self::Polynomial { .. } => DistributionType::Polynomial,
            Self::Evaporation { .. } => DistributionType::Evaporation,
            Self::MaxwellFission { .. } => DistributionType::MaxwellFission,
            Self::Watt { .. } => DistributionType::Watt,
            Self::CutoffElastic { .. } => DistributionType::CutoffElastic,
            Self::HybridElastic { .. } => DistributionType::HybridElastic,
            Self::AnalogElastic { .. } => DistributionType::AnalogElastic,
        }
    }

    /// Serializes the record to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|error| {
            DistributionError::invalid(format!("the record can not be serialized: {}", error))
        })
    }

    /// Reads a record from JSON. Malformed input and unknown families are an
    /// `UnsupportedFormat`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|error| {
            DistributionError::unsupported(format!("not a distribution record: {}", error))
        })
    }

    fn mismatch(self, expected: DistributionType) -> DistributionError {
        DistributionError::invalid(format!(
            "expected a {:?} record, got a {:?} record",
            expected,
            self.distribution_type()
        ))
    }
}

impl From<&TabularDistribution> for DistributionRecord {
    fn from(dist: &TabularDistribution) -> Self {
        Self::Tabular(dist.into())
    }
}

impl From<&PolynomialDistribution> for DistributionRecord {
    fn from(dist: &PolynomialDistribution) -> Self {
        Self::Polynomial {
            coefficients: dist.coefficients().to_vec(),
            min: dist.lower_bound(),
            max: dist.upper_bound(),
        }
    }
}

impl From<&EvaporationDistribution> for DistributionRecord {
    fn from(dist: &EvaporationDistribution) -> Self {
        Self::Evaporation {
            incident_energy: dist.incident_energy(),
            nuclear_temperature: dist.nuclear_temperature(),
            restriction_energy: dist.restriction_energy(),
        }
    }
}

impl From<&MaxwellFissionDistribution> for DistributionRecord {
    fn from(dist: &MaxwellFissionDistribution) -> Self {
        Self::MaxwellFission {
            incident_energy: dist.incident_energy(),
            nuclear_temperature: dist.nuclear_temperature(),
            restriction_energy: dist.restriction_energy(),
        }
    }
}

impl From<&WattDistribution> for DistributionRecord {
    fn from(dist: &WattDistribution) -> Self {
        Self::Watt {
            incident_energy: dist.incident_energy(),
            a_parameter: dist.a_parameter(),
            b_parameter: dist.b_parameter(),
            restriction_energy: dist.restriction_energy(),
        }
    }
}

impl From<&CutoffElasticDistribution> for DistributionRecord {
    fn from(dist: &CutoffElasticDistribution) -> Self {
        Self::CutoffElastic {
            table: dist.table().into(),
            cutoff_cosine: dist.cutoff_cosine(),
            cutoff_cross_section_ratio: dist.cutoff_cross_section_ratio(),
        }
    }
}

impl From<&HybridElasticDistribution> for DistributionRecord {
    fn from(dist: &HybridElasticDistribution) -> Self {
        Self::HybridElastic {
            table: dist.table().into(),
            cutoff_cosine: dist.cutoff_cosine(),
            cutoff_cross_section_ratio: dist.cutoff_cross_section_ratio(),
            discrete_angles: dist.discrete_angles().to_vec(),
            cumulative_weights: dist.discrete_cdf().to_vec(),
        }
    }
}

impl From<&AnalogElasticDistribution> for DistributionRecord {
    fn from(dist: &AnalogElasticDistribution) -> Self {
        Self::AnalogElastic {
            table: dist.table().into(),
            cutoff_cosine: dist.cutoff_cosine(),
            cutoff_cross_section_ratio: dist.cutoff_cross_section_ratio(),
            screening_parameter: dist.screening_parameter(),
        }
    }
}

impl From<&ElasticDistribution> for DistributionRecord {
    fn from(dist: &ElasticDistribution) -> Self {
        match dist {
            ElasticDistribution::Cutoff(dist) => dist.into(),
            ElasticDistribution::Hybrid(dist) => dist.into(),
            ElasticDistribution::Analog(dist) => dist.into(),
        }
    }
}

impl TryFrom<DistributionRecord> for TabularDistribution {
    type Error = DistributionError;

    fn try_from(record: DistributionRecord) -> Result<Self> {
        match record {
            DistributionRecord::Tabular(table) => Self::try_from(table),
            other => Err(other.mismatch(DistributionType::Tabular)),
        }
    }
}

impl TryFrom<DistributionRecord> for PolynomialDistribution {
    type Error = DistributionError;

    fn try_from(record: DistributionRecord) -> Result<Self> {
        match record {
            DistributionRecord::Polynomial {
                coefficients,
                min,
                max,
            } => Self::new(&coefficients, min, max),
            other => Err(other.mismatch(DistributionType::Polynomial)),
        }
    }
}

impl TryFrom<DistributionRecord> for EvaporationDistribution {
    type Error = DistributionError;

    fn try_from(record: DistributionRecord) -> Result<Self> {
        match record {
            DistributionRecord::Evaporation {
                incident_energy,
                nuclear_temperature,
                restriction_energy,
            } => Self::new(incident_energy, nuclear_temperature, restriction_energy),
            other => Err(other.mismatch(DistributionType::Evaporation)),
        }
    }
}

impl TryFrom<DistributionRecord> for MaxwellFissionDistribution {
    type Error = DistributionError;

    fn try_from(record: DistributionRecord) -> Result<Self> {
        match record {
            DistributionRecord::MaxwellFission {
                incident_energy,
                nuclear_temperature,
                restriction_energy,
            } => Self::new(incident_energy, nuclear_temperature, restriction_energy),
            other => Err(other.mismatch(DistributionType::MaxwellFission)),
        }
    }
}

impl TryFrom<DistributionRecord> for WattDistribution {
    type Error = DistributionError;

    fn try_from(record: DistributionRecord) -> Result<Self> {
        match record {
            DistributionRecord::Watt {
                incident_energy,
                a_parameter,
                b_parameter,
                restriction_energy,
            } => Self::new(incident_energy, a_parameter, b_parameter, restriction_energy),
            other => Err(other.mismatch(DistributionType::Watt)),
        }
    }
}

impl TryFrom<DistributionRecord> for ElasticDistribution {
    type Error = DistributionError;

    fn try_from(record: DistributionRecord) -> Result<Self> {
        match record {
            DistributionRecord::CutoffElastic {
                table,
                cutoff_cosine,
                cutoff_cross_section_ratio,
            } => CutoffElasticDistribution::new(
                TabularDistribution::try_from(table)?,
                cutoff_cosine,
                cutoff_cross_section_ratio,
            )
            .map(Self::Cutoff),
            DistributionRecord::HybridElastic {
                table,
                cutoff_cosine,
                cutoff_cross_section_ratio,
                discrete_angles,
                cumulative_weights,
            } => HybridElasticDistribution::new(
                TabularDistribution::try_from(table)?,
                cutoff_cosine,
                cutoff_cross_section_ratio,
                &discrete_angles,
                &cumulative_weights,
            )
            .map(Self::Hybrid),
            DistributionRecord::AnalogElastic {
                table,
                cutoff_cosine,
                cutoff_cross_section_ratio,
                screening_parameter,
            } => AnalogElasticDistribution::new(
                TabularDistribution::try_from(table)?,
                cutoff_cosine,
                cutoff_cross_section_ratio,
                screening_parameter,
            )
            .map(Self::Analog),
            other => Err(DistributionError::invalid(format!(
                "expected an elastic record, got a {:?} record",
                other.distribution_type()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::elastic::tests::angular_table;
    use crate::core::TabularOneDDistribution;

    #[test]
    fn closed_form_families() {
        let evaporation = EvaporationDistribution::new(3.0, 2.0, 0.5).unwrap();
        let maxwell = MaxwellFissionDistribution::new(1.0, 1.0, 0.1).unwrap();
        let polynomial = PolynomialDistribution::new(&[1.0, 0.0, 3.0], 0.5, 2.0).unwrap();

        let record = DistributionRecord::from_json(
            &DistributionRecord::from(&evaporation).to_json().unwrap(),
        )
        .unwrap();
        assert_eq!(record.distribution_type(), DistributionType::Evaporation);
        assert_eq!(EvaporationDistribution::try_from(record).unwrap(), evaporation);

        let record = DistributionRecord::from(&maxwell);
        assert_eq!(MaxwellFissionDistribution::try_from(record).unwrap(), maxwell);

        let record = DistributionRecord::from(&polynomial);
        assert_eq!(PolynomialDistribution::try_from(record).unwrap(), polynomial);
    }

    #[test]
    fn elastic_families() {
        let hybrid = ElasticDistribution::Hybrid(
            HybridElasticDistribution::new(angular_table(), 0.9, 0.6, &[0.95, 0.99], &[0.5, 2.0])
                .unwrap(),
        );
        let analog = ElasticDistribution::Analog(
            AnalogElasticDistribution::new(angular_table(), 0.9, 0.25, 0.01).unwrap(),
        );

        for dist in vec![hybrid, analog] {
            let json = DistributionRecord::from(&dist).to_json().unwrap();
            let restored =
                ElasticDistribution::try_from(DistributionRecord::from_json(&json).unwrap())
                    .unwrap();

            assert_eq!(restored.distribution_type(), dist.distribution_type());
            assert_eq!(restored.evaluate_cdf(0.97), dist.evaluate_cdf(0.97));
            assert_eq!(restored.sample_with_random_number(0.8), dist.sample_with_random_number(0.8));
        }
    }

    #[test]
    fn interpolation_defaults_to_lin_lin() {
        let json = r#"{"Tabular":{"indep":[0.0,1.0],"dep":[1.0,1.0]}}"#;
        let table = TabularDistribution::try_from(DistributionRecord::from_json(json).unwrap())
            .unwrap();

        assert_eq!(table.interpolation(), Interpolation::LinLin);
    }

    #[test]
    fn records_are_validated() {
        let json = r#"{"Watt":{"incident_energy":1.0,"a_parameter":-1.0,"b_parameter":1.0,"restriction_energy":0.1}}"#;
        let record = DistributionRecord::from_json(json).unwrap();
        assert!(WattDistribution::try_from(record)
            .unwrap_err()
            .is_invalid_parameter());

        let record = DistributionRecord::from(&WattDistribution::new(1.0, 1.0, 1.0, 0.1).unwrap());
        assert!(EvaporationDistribution::try_from(record.clone())
            .unwrap_err()
            .is_invalid_parameter());
        assert!(ElasticDistribution::try_from(record)
            .unwrap_err()
            .is_invalid_parameter());

        assert!(DistributionRecord::from_json(r#"{"Gaussian":{"mean":0.0}}"#)
            .unwrap_err()
            .is_unsupported_format());
        assert!(DistributionRecord::from_json("[1, 2")
            .unwrap_err()
            .is_unsupported_format());
    }
}
