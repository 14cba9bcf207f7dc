//! Interpolation policies for tabulated data.
//!
//! A policy is named after its dependent axis first and its independent axis second: `LinLog` is
//! linear in the dependent value and logarithmic in the independent value. The policy is chosen at
//! run time, every tabulated object stores the [`Interpolation`] it was built with.
use crate::core::error::{DistributionError, Result};
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// The four supported interpolation schemes.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Interpolation {
    /// Linear in `y`, linear in `x`.
    LinLin,
    /// Linear in `y`, logarithmic in `x`.
    LinLog,
    /// Logarithmic in `y`, linear in `x`.
    LogLin,
    /// Logarithmic in `y`, logarithmic in `x`.
    LogLog,
}

impl Default for Interpolation {
    fn default() -> Self {
        Self::LinLin
    }
}

impl Interpolation {
    /// Returns `true` if the independent axis is logarithmic.
    pub fn is_indep_log(self) -> bool {
        matches!(self, Self::LinLog | Self::LogLog)
    }

    /// Returns `true` if the dependent axis is logarithmic.
    pub fn is_dep_log(self) -> bool {
        matches!(self, Self::LogLin | Self::LogLog)
    }

    /// Interpolates between `(x0, y0)` and `(x1, y1)` at `x`. The bracket must be non-degenerate
    /// and, on logarithmic axes, strictly positive.
    pub fn interpolate<T: Float>(self, x0: T, x1: T, x: T, y0: T, y1: T) -> T {
        let (u0, u1, u) = if self.is_indep_log() {
            (x0.ln(), x1.ln(), x.ln())
        } else {
            (x0, x1, x)
        };

        let weight = (u - u0) / (u1 - u0);

        if self.is_dep_log() {
            (y0.ln() + weight * (y1.ln() - y0.ln())).exp()
        } else {
            y0 + weight * (y1 - y0)
        }
    }

    /// Checks that the grid `(x, y)` can be handled by this policy: both axes need to have the
    /// same length, `x` must be strictly increasing and finite, `y` must be finite and
    /// non-negative, and logarithmic axes must be strictly positive.
    pub fn validate_grid(self, x: &[f64], y: &[f64]) -> Result<()> {
        if x.len() != y.len() {
            return Err(DistributionError::invalid(format!(
                "grid sizes differ: {} independent and {} dependent values",
                x.len(),
                y.len()
            )));
        }

        if x.len() < 2 {
            return Err(DistributionError::invalid(
                "a grid needs at least two points",
            ));
        }

        if let Some(bad) = x.iter().chain(y).find(|v| !v.is_finite()) {
            return Err(DistributionError::invalid(format!(
                "grid value {} is not finite",
                bad
            )));
        }

        if x.windows(2).any(|w| w[1] <= w[0]) {
            return Err(DistributionError::invalid(
                "independent values must be strictly increasing",
            ));
        }

        if y.iter().any(|&v| v < 0.0) {
            return Err(DistributionError::invalid(
                "dependent values must not be negative",
            ));
        }

        if self.is_indep_log() && x[0] <= 0.0 {
            return Err(DistributionError::invalid(format!(
                "{:?} interpolation needs positive independent values",
                self
            )));
        }

        if self.is_dep_log() && y.iter().any(|&v| v <= 0.0) {
            return Err(DistributionError::invalid(format!(
                "{:?} interpolation needs positive dependent values",
                self
            )));
        }

        Ok(())
    }

    /// Returns the slope of the bin `[x0, x1]` in the coordinates of this policy.
    pub(crate) fn slope(self, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
        match self {
            Self::LinLin => (y1 - y0) / (x1 - x0),
            Self::LinLog => (y1 - y0) / (x1 / x0).ln(),
            Self::LogLin => (y1 / y0).ln() / (x1 - x0),
            Self::LogLog => (y1 / y0).ln() / (x1 / x0).ln(),
        }
    }

    /// Evaluates the interpolant of the bin starting at `(x0, y0)` with the given `slope`.
    pub(crate) fn evaluate_with_slope(self, x0: f64, y0: f64, slope: f64, x: f64) -> f64 {
        match self {
            Self::LinLin => y0 + slope * (x - x0),
            Self::LinLog => y0 + slope * (x / x0).ln(),
            Self::LogLin => y0 * (slope * (x - x0)).exp(),
            Self::LogLog => y0 * (x / x0).powf(slope),
        }
    }

    /// Returns the integral of the interpolant from `x0` to `x`.
    pub(crate) fn partial_integral(self, x0: f64, y0: f64, slope: f64, x: f64) -> f64 {
        let d = x - x0;

        match self {
            Self::LinLin => d * (y0 + 0.5 * slope * d),
            Self::LinLog => {
                let t = (x / x0).ln();
                y0 * d + slope * (x * t - d)
            }
            Self::LogLin => {
                let bd = slope * d;

                if bd.abs() <= f64::EPSILON {
                    y0 * d * (1.0 + 0.5 * bd)
                } else {
                    y0 * bd.exp_m1() / slope
                }
            }
            Self::LogLog => {
                let q = slope + 1.0;
                let t = (x / x0).ln();

                if (q * t).abs() <= f64::EPSILON {
                    y0 * x0 * t * (1.0 + 0.5 * q * t)
                } else {
                    y0 * x0 * (q * t).exp_m1() / q
                }
            }
        }
    }

    /// Returns the `x` in `[x0, x1]` at which the integral of the interpolant starting at `x0`
    /// reaches `area`.
    pub(crate) fn invert_partial_integral(
        self,
        x0: f64,
        x1: f64,
        y0: f64,
        slope: f64,
        area: f64,
    ) -> f64 {
        if area <= 0.0 {
            return x0;
        }

        let x = match self {
            Self::LinLin => {
                // stable root of slope/2 d^2 + y0 d - area = 0
                let denominator = y0 + (y0 * y0 + 2.0 * slope * area).max(0.0).sqrt();

                if denominator > 0.0 {
                    x0 + 2.0 * area / denominator
                } else {
                    x0
                }
            }
            Self::LogLin => {
                let ratio = slope * area / y0;

                if ratio.abs() <= f64::EPSILON {
                    x0 + area / y0
                } else {
                    x0 + ratio.ln_1p() / slope
                }
            }
            Self::LogLog => {
                let q = slope + 1.0;
                let ratio = q * area / (y0 * x0);

                if ratio.abs() <= f64::EPSILON {
                    x0 * (area / (y0 * x0)).exp()
                } else {
                    x0 * (ratio.ln_1p() / q).exp()
                }
            }
            Self::LinLog => self.invert_numerically(x0, x1, y0, slope, area),
        };

        x.max(x0).min(x1)
    }

    /// Safeguarded Newton iteration for policies without a closed-form inverse. The integral is
    /// monotone in `x` because the interpolant is non-negative on the bin.
    fn invert_numerically(self, x0: f64, x1: f64, y0: f64, slope: f64, area: f64) -> f64 {
        const MAX_ITERATIONS: usize = 100;

        let total = self.partial_integral(x0, y0, slope, x1);

        if area >= total {
            return x1;
        }

        let mut low = x0;
        let mut high = x1;
        let mut x = x0 + (x1 - x0) * area / total;

        for _ in 0..MAX_ITERATIONS {
            let residual = self.partial_integral(x0, y0, slope, x) - area;

            if residual > 0.0 {
                high = x;
            } else {
                low = x;
            }

            let density = self.evaluate_with_slope(x0, y0, slope, x);
            let mut next = if density > 0.0 {
                x - residual / density
            } else {
                0.5 * (low + high)
            };

            if next <= low || next >= high {
                next = 0.5 * (low + high);
            }

            if (next - x).abs() <= 4.0 * f64::EPSILON * x.abs() {
                return next;
            }

            x = next;
        }

        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const ALL: [Interpolation; 4] = [
        Interpolation::LinLin,
        Interpolation::LinLog,
        Interpolation::LogLin,
        Interpolation::LogLog,
    ];

    #[test]
    fn interpolate_lin_lin() {
        assert_approx_eq!(Interpolation::LinLin.interpolate(0.0, 1.0, 0.5, 0.0, 10.0), 5.0);
        assert_approx_eq!(
            Interpolation::LinLin.interpolate(0.0_f32, 1.0, 0.25, 4.0, 8.0),
            5.0_f32
        );
    }

    #[test]
    fn interpolate_log_variants() {
        // lin-log: y linear in ln(x)
        assert_approx_eq!(
            Interpolation::LinLog.interpolate(1.0, 100.0, 10.0, 0.0, 2.0),
            1.0
        );
        // log-lin: ln(y) linear in x
        assert_approx_eq!(
            Interpolation::LogLin.interpolate(0.0, 1.0, 0.5, 1.0, 100.0),
            10.0
        );
        // log-log: power law y = x^2
        assert_approx_eq!(
            Interpolation::LogLog.interpolate(1.0, 10.0, 3.0, 1.0, 100.0),
            9.0,
            1e-12
        );
    }

    #[test]
    fn slope_matches_interpolate() {
        for &policy in &ALL {
            let slope = policy.slope(1.0, 4.0, 2.0, 5.0);

            assert_approx_eq!(
                policy.evaluate_with_slope(1.0, 2.0, slope, 2.5),
                policy.interpolate(1.0, 4.0, 2.5, 2.0, 5.0),
                1e-12
            );
        }
    }

    #[test]
    fn partial_integral_matches_quadrature() {
        let (x0, x1, y0, y1) = (1.0, 3.0, 2.0, 0.5);

        for &policy in &ALL {
            let slope = policy.slope(x0, x1, y0, y1);

            // composite Simpson rule
            let n = 2000;
            let h = (x1 - x0) / n as f64;
            let mut sum = 0.0;

            for i in 0..=n {
                let weight = if i == 0 || i == n {
                    1.0
                } else if i % 2 == 1 {
                    4.0
                } else {
                    2.0
                };
                sum += weight * policy.evaluate_with_slope(x0, y0, slope, x0 + i as f64 * h);
            }

            assert_approx_eq!(
                policy.partial_integral(x0, y0, slope, x1),
                sum * h / 3.0,
                1e-10
            );
        }
    }

    #[test]
    fn inversion_recovers_position() {
        let (x0, x1, y0, y1) = (2.0, 5.0, 0.75, 3.0);

        for &policy in &ALL {
            let slope = policy.slope(x0, x1, y0, y1);

            for &x in &[2.0, 2.1, 3.3, 4.999, 5.0] {
                let area = policy.partial_integral(x0, y0, slope, x);

                assert_approx_eq!(
                    policy.invert_partial_integral(x0, x1, y0, slope, area),
                    x,
                    1e-12
                );
            }
        }
    }

    #[test]
    fn inversion_of_flat_and_empty_bins() {
        let flat = Interpolation::LinLin.slope(0.0, 2.0, 1.0, 1.0);
        assert_approx_eq!(
            Interpolation::LinLin.invert_partial_integral(0.0, 2.0, 1.0, flat, 0.5),
            0.5
        );

        let empty = Interpolation::LinLin.slope(0.0, 2.0, 0.0, 0.0);
        assert_approx_eq!(
            Interpolation::LinLin.invert_partial_integral(0.0, 2.0, 0.0, empty, 0.0),
            0.0
        );
    }

    #[test]
    fn grid_validation() {
        assert!(Interpolation::LinLin
            .validate_grid(&[0.0, 1.0], &[0.0, 1.0])
            .is_ok());
        assert!(Interpolation::LinLin
            .validate_grid(&[0.0], &[1.0])
            .is_err());
        assert!(Interpolation::LinLin
            .validate_grid(&[0.0, 1.0], &[1.0])
            .is_err());
        assert!(Interpolation::LinLin
            .validate_grid(&[1.0, 1.0], &[1.0, 1.0])
            .is_err());
        assert!(Interpolation::LinLin
            .validate_grid(&[0.0, 1.0], &[1.0, -1.0])
            .is_err());
        assert!(Interpolation::LinLin
            .validate_grid(&[0.0, f64::INFINITY], &[1.0, 1.0])
            .is_err());
        assert!(Interpolation::LinLog
            .validate_grid(&[0.0, 1.0], &[1.0, 1.0])
            .is_err());
        assert!(Interpolation::LogLin
            .validate_grid(&[0.0, 1.0], &[0.0, 1.0])
            .is_err());
        assert!(Interpolation::LogLog
            .validate_grid(&[1.0, 2.0], &[1.0, 3.0])
            .is_ok());
    }
}
