//! Concrete distribution families.
pub mod elastic;
pub mod evaporation;
pub mod maxwell_fission;
pub mod polynomial;
pub mod tabular;
pub mod watt;

pub use crate::distributions::elastic::{
    AnalogElasticDistribution, CutoffElasticDistribution, ElasticDistribution,
    HybridElasticDistribution,
};
pub use crate::distributions::evaporation::EvaporationDistribution;
pub use crate::distributions::maxwell_fission::MaxwellFissionDistribution;
pub use crate::distributions::polynomial::PolynomialDistribution;
pub use crate::distributions::tabular::TabularDistribution;
pub use crate::distributions::watt::WattDistribution;
