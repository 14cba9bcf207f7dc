//! Special functions needed for closed-form normalization constants.
use std::f64::consts::PI;

/// Below this magnitude the power series is used, above it the continued fraction.
const SERIES_LIMIT: f64 = 3.0;

/// The error function, accurate to a few units in the last place over the whole real line.
///
/// For `|x| < 3` the series `erf(x) = 2/√π exp(-x²) Σ 2ⁿ x²ⁿ⁺¹ / (1·3·5···(2n+1))` is summed;
/// all of its terms are positive, so there is no cancellation. For larger arguments the
/// complement is computed from its continued fraction.
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }

    let abs_x = x.abs();

    let value = if abs_x < SERIES_LIMIT {
        erf_series(abs_x)
    } else {
        1.0 - erfc_continued_fraction(abs_x)
    };

    value.copysign(x)
}

/// The complementary error function `1 - erf(x)`.
pub fn erfc(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }

    if x >= SERIES_LIMIT {
        erfc_continued_fraction(x)
    } else {
        1.0 - erf(x)
    }
}

/// The lower incomplete gamma function `γ(s, y) = ∫_0^y t^(s-1) exp(-t) dt` for `s > 0` and
/// `y >= 0`, summed from its series `y^s exp(-y) Σ yⁿ / (s (s+1) ··· (s+n))`. All terms are
/// positive, which keeps small arguments free of cancellation. Converges quickly for `y` up to a
/// few times `s`.
pub fn lower_incomplete_gamma(s: f64, y: f64) -> f64 {
    if y <= 0.0 {
        return 0.0;
    }

    let mut term = 1.0 / s;
    let mut sum = term;
    let mut denominator = s;

    loop {
        denominator += 1.0;
        term *= y / denominator;
        sum += term;

        if term <= sum * f64::EPSILON * 0.5 {
            break;
        }
    }

    (s * y.ln() - y).exp() * sum
}

fn erf_series(x: f64) -> f64 {
    let x2 = x * x;
    let mut term = x;
    let mut sum = x;
    let mut n = 0.0;

    loop {
        n += 1.0;
        term *= 2.0 * x2 / (2.0 * n + 1.0);
        sum += term;

        if term <= sum * f64::EPSILON * 0.5 {
            break;
        }
    }

    2.0 / PI.sqrt() * (-x2).exp() * sum
}

/// `erfc(x) = exp(-x²)/√π · 1/(x + (1/2)/(x + 1/(x + (3/2)/(x + ...))))`, evaluated backwards.
fn erfc_continued_fraction(x: f64) -> f64 {
    const TERMS: u32 = 60;

    if x.is_infinite() {
        return 0.0;
    }

    let mut fraction = x;

    for k in (1..=TERMS).rev() {
        fraction = x + 0.5 * f64::from(k) / fraction;
    }

    (-x * x).exp() / (PI.sqrt() * fraction)
}
