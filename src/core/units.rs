//! Unit-tagged quantities and unit-aware distributions.
//!
//! Distributions store plain `f64` values. [`UnitAware`] attaches a unit to the independent
//! variable of a distribution, and [`convert`] re-expresses it in another unit of the same
//! dimension. Mixing dimensions is rejected by the compiler.
use crate::core::random::RandomSource;
use crate::core::{OneDDistribution, TabularOneDDistribution};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Energy dimension.
#[derive(Clone, Copy, Debug)]
pub enum Energy {}

/// Dimension of pure numbers, such as scattering-angle cosines.
#[derive(Clone, Copy, Debug)]
pub enum Dimensionless {}

/// A unit of measurement.
pub trait Unit: Clone + Copy + Debug + Default + Send + Sync + 'static {
    /// The physical dimension measured by this unit.
    type Dimension;
    /// The size of this unit expressed in the base unit of its dimension.
    const SCALE: f64;
    /// Symbol used when printing quantities.
    const SYMBOL: &'static str;
}

macro_rules! unit {
    ($(#[$doc:meta])* $name:ident, $dimension:ty, $scale:expr, $symbol:expr) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
        pub struct $name;

        impl Unit for $name {
            type Dimension = $dimension;
            const SCALE: f64 = $scale;
            const SYMBOL: &'static str = $symbol;
        }
    };
}

unit!(
    /// Electron volt, the base unit of energy.
    ElectronVolt,
    Energy,
    1.0,
    "eV"
);
unit!(
    /// Kilo electron volt.
    KiloElectronVolt,
    Energy,
    1e3,
    "keV"
);
unit!(
    /// Mega electron volt, the energy unit of ACE tables.
    MegaElectronVolt,
    Energy,
    1e6,
    "MeV"
);
unit!(
    /// Cosine of a scattering angle.
    Cosine,
    Dimensionless,
    1.0,
    ""
);

/// A value tagged with a unit.
#[derive(Deserialize, Serialize)]
#[serde(transparent)]
pub struct Quantity<U> {
    value: f64,
    #[serde(skip)]
    unit: PhantomData<U>,
}

impl<U: Unit> Quantity<U> {
    /// Creates a quantity of `value` units `U`.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            unit: PhantomData,
        }
    }

    /// The numerical value in units of `U`.
    pub fn value(self) -> f64 {
        self.value
    }

    /// Returns the same quantity expressed in the unit `V`.
    pub fn to<V>(self) -> Quantity<V>
    where
        V: Unit<Dimension = U::Dimension>,
    {
        Quantity::new(self.value * U::SCALE / V::SCALE)
    }
}

impl<U> Clone for Quantity<U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for Quantity<U> {}

impl<U: Unit> Debug for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quantity({} {})", self.value, U::SYMBOL)
    }
}

impl<U: Unit> Display for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if U::SYMBOL.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, U::SYMBOL)
        }
    }
}

impl<U> PartialEq for Quantity<U> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<U> PartialOrd for Quantity<U> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<U: Unit> Add for Quantity<U> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.value + other.value)
    }
}

impl<U: Unit> Sub for Quantity<U> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.value - other.value)
    }
}

impl<U: Unit> Neg for Quantity<U> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.value)
    }
}

impl<U: Unit> Mul<f64> for Quantity<U> {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self::new(self.value * factor)
    }
}

impl<U: Unit> Mul<Quantity<U>> for f64 {
    type Output = Quantity<U>;

    fn mul(self, quantity: Quantity<U>) -> Quantity<U> {
        quantity * self
    }
}

impl<U: Unit> Div<f64> for Quantity<U> {
    type Output = Self;

    fn div(self, divisor: f64) -> Self {
        Self::new(self.value / divisor)
    }
}

/// Ratio of two quantities with the same unit.
impl<U: Unit> Div for Quantity<U> {
    type Output = f64;

    fn div(self, other: Self) -> f64 {
        self.value / other.value
    }
}

/// A distribution whose independent variable carries the unit `U`.
///
/// Densities are returned per unit `U`, so `evaluate_pdf` changes by the ratio of the unit sizes
/// when the distribution is converted.
#[derive(Clone, Debug)]
pub struct UnitAware<D, U> {
    distribution: D,
    // value of one unit of the wrapped distribution's variable in units of `U`
    scale: f64,
    unit: PhantomData<U>,
}

impl<D: OneDDistribution, U: Unit> UnitAware<D, U> {
    /// Attaches the unit `U` to the independent variable of `distribution`.
    pub fn new(distribution: D) -> Self {
        Self {
            distribution,
            scale: 1.0,
            unit: PhantomData,
        }
    }

    /// The wrapped unitless distribution.
    pub fn distribution(&self) -> &D {
        &self.distribution
    }

    fn unitless(&self, x: Quantity<U>) -> f64 {
        x.value() / self.scale
    }

    /// Evaluates the unnormalized density.
    pub fn evaluate(&self, x: Quantity<U>) -> f64 {
        self.distribution.evaluate(self.unitless(x))
    }

    /// Evaluates the normalized density per unit `U`.
    pub fn evaluate_pdf(&self, x: Quantity<U>) -> f64 {
        self.distribution.evaluate_pdf(self.unitless(x)) / self.scale
    }

    /// Draws a sample.
    pub fn sample<R>(&self, rng: &mut R) -> Quantity<U>
    where
        R: RandomSource + ?Sized,
    {
        Quantity::new(self.scale * self.distribution.sample(rng))
    }

    /// Draws a sample and adds the number of candidates that were needed to `trials`.
    pub fn sample_and_record_trials<R>(&self, rng: &mut R, trials: &mut u64) -> Quantity<U>
    where
        R: RandomSource + ?Sized,
    {
        Quantity::new(self.scale * self.distribution.sample_and_record_trials(rng, trials))
    }

    /// The lower bound of the independent variable.
    pub fn lower_bound(&self) -> Quantity<U> {
        Quantity::new(self.scale * self.distribution.lower_bound())
    }

    /// The upper bound of the independent variable.
    pub fn upper_bound(&self) -> Quantity<U> {
        Quantity::new(self.scale * self.distribution.upper_bound())
    }
}

impl<D: TabularOneDDistribution, U: Unit> UnitAware<D, U> {
    /// Evaluates the cumulative distribution function.
    pub fn evaluate_cdf(&self, x: Quantity<U>) -> f64 {
        self.distribution.evaluate_cdf(self.unitless(x))
    }

    /// Draws a sample conditioned on `[lower_bound, max]`.
    pub fn sample_in_subrange<R>(&self, rng: &mut R, max: Quantity<U>) -> Quantity<U>
    where
        R: RandomSource + ?Sized,
    {
        let max = self.unitless(max);
        Quantity::new(self.scale * self.distribution.sample_in_subrange(rng, max))
    }
}

/// Re-expresses `distribution` in the unit `target`, which must measure the same dimension.
pub fn convert<D, U, V>(distribution: UnitAware<D, U>, _target: V) -> UnitAware<D, V>
where
    D: OneDDistribution,
    U: Unit,
    V: Unit<Dimension = U::Dimension>,
{
    UnitAware {
        scale: distribution.scale * U::SCALE / V::SCALE,
        distribution: distribution.distribution,
        unit: PhantomData,
    }
}
