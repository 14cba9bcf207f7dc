//! Elastic angular distributions selected by a form flag.
use crate::core::error::{DistributionError, Result};
use crate::core::{Interpolation, OneDDistribution};
use crate::distributions::{
    AnalogElasticDistribution, CutoffElasticDistribution, ElasticDistribution,
    HybridElasticDistribution, TabularDistribution,
};

/// The raw data of an elastic angular distribution. Fields that the selected form does not use
/// are ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElasticTable<'a> {
    /// Tabulated scattering-angle cosines, starting at `-1`.
    pub angles: &'a [f64],
    /// Unnormalized density at `angles`.
    pub pdf: &'a [f64],
    /// Interpolation of the tabulated density.
    pub interpolation: Interpolation,
    /// The cutoff cosine `μc`.
    pub cutoff_cosine: f64,
    /// Ratio of the cutoff cross section to the total cross section.
    pub cutoff_cross_section_ratio: f64,
    /// Discrete angles above the cutoff cosine, used by the hybrid form.
    pub discrete_angles: &'a [f64],
    /// Cumulative weights of the discrete angles, used by the hybrid form.
    pub discrete_cumulative_weights: &'a [f64],
    /// The Moliere screening constant, used by the analog form.
    pub screening_parameter: f64,
}

/// Builds the elastic distribution with form flag `form` of the table `table_name`: 1 for cutoff,
/// 2 for hybrid and 3 for analog. Any other flag is an `UnsupportedFormat`.
pub fn create_elastic_distribution(
    table_name: &str,
    form: i32,
    data: &ElasticTable,
) -> Result<ElasticDistribution> {
    let result = build_elastic_distribution(form, data);

    match &result {
        Ok(distribution) => tracing::debug!(
            "created {:?} elastic distribution with cutoff cosine {} for table '{}'",
            distribution.distribution_type(),
            distribution.cutoff_cosine(),
            table_name
        ),
        Err(error) => tracing::warn!(
            "no elastic distribution for table '{}': {}",
            table_name,
            error
        ),
    }

    result.map_err(|error| error.in_table(table_name))
}

fn build_elastic_distribution(form: i32, data: &ElasticTable) -> Result<ElasticDistribution> {
    if !(1..=3).contains(&form) {
        return Err(DistributionError::unsupported(format!(
            "elastic distribution form {}",
            form
        )));
    }

    let table = TabularDistribution::new(data.angles, data.pdf, data.interpolation)?;

    match form {
        1 => CutoffElasticDistribution::new(
            table,
            data.cutoff_cosine,
            data.cutoff_cross_section_ratio,
        )
        .map(ElasticDistribution::Cutoff),
        2 => HybridElasticDistribution::new(
            table,
            data.cutoff_cosine,
            data.cutoff_cross_section_ratio,
            data.discrete_angles,
            data.discrete_cumulative_weights,
        )
        .map(ElasticDistribution::Hybrid),
        _ => AnalogElasticDistribution::new(
            table,
            data.cutoff_cosine,
            data.cutoff_cross_section_ratio,
            data.screening_parameter,
        )
        .map(ElasticDistribution::Analog),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DistributionType, TabularOneDDistribution};
    use assert_approx_eq::assert_approx_eq;

    fn data() -> ElasticTable<'static> {
        ElasticTable {
            angles: &[-1.0, 0.0, 0.5, 0.9, 1.0],
            pdf: &[0.5, 1.0, 2.0, 4.0, 8.0],
            interpolation: Interpolation::LinLin,
            cutoff_cosine: 0.9,
            cutoff_cross_section_ratio: 0.6,
            discrete_angles: &[0.95, 0.99],
            discrete_cumulative_weights: &[0.5, 2.0],
            screening_parameter: 0.01,
        }
    }

    #[test]
    fn forms() {
        let cutoff = create_elastic_distribution("test", 1, &data()).unwrap();
        let hybrid = create_elastic_distribution("test", 2, &data()).unwrap();
        let analog = create_elastic_distribution("test", 3, &data()).unwrap();

        assert_eq!(cutoff.distribution_type(), DistributionType::CutoffElastic);
        assert_eq!(hybrid.distribution_type(), DistributionType::HybridElastic);
        assert_eq!(analog.distribution_type(), DistributionType::AnalogElastic);

        assert_eq!(cutoff.upper_bound(), 0.9);
        assert_eq!(hybrid.upper_bound(), 1.0);

        for dist in &[&hybrid, &analog] {
            assert_approx_eq!(dist.evaluate_cdf(0.9), 0.6, 1e-15);
            assert_eq!(dist.cutoff_cross_section_ratio(), 0.6);
        }
    }

    #[test]
    fn unsupported_form() {
        let error = create_elastic_distribution("1000.12p", 4, &data()).unwrap_err();

        assert!(error.is_unsupported_format());
        assert!(matches!(
            &error,
            DistributionError::Table { table_name, .. } if table_name == "1000.12p"
        ));
        assert!(create_elastic_distribution("test", 0, &data())
            .unwrap_err()
            .is_unsupported_format());
    }

    #[test]
    fn invalid_data() {
        let mut bad_ratio = data();
        bad_ratio.cutoff_cross_section_ratio = 0.0;
        assert!(create_elastic_distribution("test", 1, &bad_ratio)
            .unwrap_err()
            .is_invalid_parameter());

        let mut no_peak = data();
        no_peak.discrete_angles = &[];
        no_peak.discrete_cumulative_weights = &[];
        assert!(create_elastic_distribution("test", 2, &no_peak)
            .unwrap_err()
            .is_invalid_parameter());

        let mut no_screening = data();
        no_screening.screening_parameter = -1.0;
        assert!(create_elastic_distribution("test", 3, &no_screening)
            .unwrap_err()
            .is_invalid_parameter());

        let mut mismatched = data();
        mismatched.pdf = &[1.0, 1.0];
        assert!(create_elastic_distribution("test", 1, &mismatched)
            .unwrap_err()
            .is_invalid_parameter());
    }
}
