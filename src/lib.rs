#![warn(clippy::all, clippy::cargo, clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]

//! The crate `transport-distributions` provides one-dimensional probability distributions as they
//! are needed inside a Monte Carlo particle-transport code: emission-energy spectra,
//! scattering-angle distributions and outgoing-energy laws. Every distribution can be evaluated,
//! normalized and, most importantly, sampled *exactly*: no sampler approximates its density, so the
//! histogram of many samples converges to the density returned by `evaluate_pdf`.
//!
//! # Features
//!
//! This library was designed with the following features as essential in mind:
//!
//! - **Exact sampling**. Tabulated densities are sampled by inverting the closed-form integral of
//! each bin for all four interpolation policies, closed-form spectra by rejection built from
//! simpler distributions, and the elastic distributions by selecting one of two branches whose
//! probabilities add up to one exactly at the cutoff cosine.
//! - **Generic random number generator**. Every random number generator that implements the `Rng`
//! trait from the `rand` crate can be passed to the samplers. There is no global generator; tests
//! use a [`FakeStream`] instead, which replays a fixed sequence of numbers.
//! - **Reproducibility**. All results only depend on the random number generator and its seed.
//! Distributions are immutable after construction and can be shared between threads, each thread
//! sampling with its own generator.
//! - **Eager validation**. Constructors and factories check their input and return a
//! [`DistributionError`] instead of a partially built distribution. Once a distribution exists,
//! evaluating and sampling it cannot fail.
//! - **Units**. The [`units`](crate::core::units) module attaches a unit of measurement to any
//! distribution, and [`convert`](crate::core::units::convert) re-expresses it in another unit of the
//! same dimension, which is checked at compile time.
//! - **ACE factories**. The [`factories`] build distributions from the raw arrays of ACE tables:
//! outgoing-energy laws, the average number of fission neutrons and elastic angular distributions.
//! - **Serialization**. Each distribution converts to and from a
//! [`DistributionRecord`](crate::serialization::DistributionRecord) of its constructor parameters,
//! which can be stored as JSON.
//!
//! # How do I get started?
//!
//! ```
//! use transport_distributions::distributions::MaxwellFissionDistribution;
//! use transport_distributions::{OneDDistribution, TabularOneDDistribution};
//! use transport_distributions::{Interpolation, distributions::TabularDistribution};
//! use rand_pcg::Pcg64;
//!
//! let mut rng = Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96);
//!
//! let spectrum = MaxwellFissionDistribution::new(2.0, 1.3, 0.1).unwrap();
//! let energy = spectrum.sample(&mut rng);
//! assert!(energy >= 0.0 && energy <= 1.9);
//!
//! let table = TabularDistribution::new(&[1.0, 2.0, 4.0], &[1.0, 4.0, 2.0], Interpolation::LogLog)
//!     .unwrap();
//! let x = table.sample_with_random_number(0.5);
//! assert!((table.evaluate_cdf(x) - 0.5).abs() < 1e-12);
//! ```
//!
//! # What is ...?
//!
//! - the *density* of a distribution is the unnormalized function returned by `evaluate`, the
//! *PDF* is the density multiplied by the normalization constant, so that it integrates to one,
//! - the *CDF* is the integral of the PDF from the lower bound, it is only available for
//! distributions implementing [`TabularOneDDistribution`],
//! - a *trial* is a single candidate of a rejection sampler. The number of trials needed per sample
//! measures the efficiency of a sampler,
//! - the *restriction energy* `U` limits the outgoing energy of the fission and evaporation spectra
//! to `[0, E - U]`, where `E` is the incident energy,
//! - the *cutoff cosine* `μc` separates the tabulated part of an elastic angular distribution from
//! its forward peak, and the *cutoff cross-section ratio* is the probability of scattering below
//! it,
//! - *ν̄* (nu-bar) is the average number of neutrons emitted per fission.

pub mod core;
pub mod distributions;
pub mod factories;
pub mod serialization;

pub use crate::core::*;
