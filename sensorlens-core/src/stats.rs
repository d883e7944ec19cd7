//! Descriptive and Inferential Statistics
//!
//! ## Overview
//!
//! The small set of statistics the analytics components are built on,
//! derived explicitly so the engine carries no statistics-library
//! dependency and runs without `std` (all transcendental math goes through
//! `libm`).
//!
//! ## Formulas
//!
//! ### Sample Standard Deviation
//! ```text
//! s = sqrt( Σ(xᵢ - x̄)² / (n - 1) )
//! ```
//!
//! ### Ordinary Least Squares
//! ```text
//! slope     = Σ(xᵢ - x̄)(yᵢ - ȳ) / Σ(xᵢ - x̄)²
//! intercept = ȳ - slope · x̄
//! ```
//! Centered sums avoid the cancellation of the `n·Σxy - Σx·Σy` form when
//! x is large (elapsed days late in a window).
//!
//! ### Welch's t-test
//! ```text
//! vᵢ = sᵢ² / nᵢ
//! t  = (x̄₁ - x̄₂) / sqrt(v₁ + v₂)
//! df = (v₁ + v₂)² / ( v₁²/(n₁-1) + v₂²/(n₂-1) )
//! p  = I_{df/(df+t²)}(df/2, 1/2)          (two-sided)
//! ```
//! where `I_x(a, b)` is the regularized incomplete beta function, evaluated
//! with the Lentz continued fraction.

use alloc::vec::Vec;

use crate::constants::analytics::{BETA_CF_EPSILON, BETA_CF_FLOOR, BETA_CF_MAX_ITERATIONS};

/// Round to `decimals` places, exact halves to even
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = libm::pow(10.0, f64::from(decimals));
    libm::rint(value * scale) / scale
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (n - 1 denominator), `None` below two samples
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values
        .iter()
        .map(|&v| {
            let diff = v - m;
            diff * diff
        })
        .sum();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// Sample standard deviation, `None` below two samples
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(libm::sqrt)
}

/// Finite values of `values`, in order
pub fn finite_only(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Fitted line `y = slope · x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Change of y per unit of x
    pub slope: f64,
    /// Value of y at x = 0
    pub intercept: f64,
}

impl LinearFit {
    /// Horizontal line at `level`
    pub fn flat(level: f64) -> Self {
        Self {
            slope: 0.0,
            intercept: level,
        }
    }

    /// Ordinary least squares over paired samples
    ///
    /// Returns `None` when fewer than two pairs are given or the slices
    /// differ in length. Zero variance in x (every sample at one position)
    /// yields the flat line through the mean of y.
    pub fn ols(xs: &[f64], ys: &[f64]) -> Option<Self> {
        if xs.len() != ys.len() || xs.len() < 2 {
            return None;
        }
        let x_mean = mean(xs)?;
        let y_mean = mean(ys)?;

        let (mut sxy, mut sxx) = (0.0, 0.0);
        for (&x, &y) in xs.iter().zip(ys) {
            let dx = x - x_mean;
            sxy += dx * (y - y_mean);
            sxx += dx * dx;
        }

        if sxx == 0.0 {
            return Some(Self::flat(y_mean));
        }
        let slope = sxy / sxx;
        Some(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    /// Value of the line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Outcome of a two-sample Welch t-test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WelchTest {
    /// Test statistic, positive when the first sample has the larger mean
    pub t_statistic: f64,
    /// Welch–Satterthwaite degrees of freedom (infinite when both variances are zero)
    pub degrees_of_freedom: f64,
    /// Two-sided p-value
    pub p_value: f64,
}

impl WelchTest {
    /// Compare two samples with unequal variances
    ///
    /// Both samples need at least two values; `None` otherwise. Callers
    /// strip non-finite values first (see [`finite_only`]).
    ///
    /// When both samples have zero variance the standard error is zero and
    /// never divided through: equal means give `t = 0, p = 1`, unequal
    /// means give `t = ±∞, p = 0`.
    pub fn compare(first: &[f64], second: &[f64]) -> Option<Self> {
        let (n1, n2) = (first.len() as f64, second.len() as f64);
        let (m1, m2) = (mean(first)?, mean(second)?);
        let v1 = sample_variance(first)? / n1;
        let v2 = sample_variance(second)? / n2;
        let se_sq = v1 + v2;

        if se_sq == 0.0 {
            let (t_statistic, p_value) = if m1 == m2 {
                (0.0, 1.0)
            } else if m1 > m2 {
                (f64::INFINITY, 0.0)
            } else {
                (f64::NEG_INFINITY, 0.0)
            };
            return Some(Self {
                t_statistic,
                degrees_of_freedom: f64::INFINITY,
                p_value,
            });
        }

        let t_statistic = (m1 - m2) / libm::sqrt(se_sq);
        let degrees_of_freedom =
            se_sq * se_sq / (v1 * v1 / (n1 - 1.0) + v2 * v2 / (n2 - 1.0));

        Some(Self {
            t_statistic,
            degrees_of_freedom,
            p_value: student_t_two_sided_p(t_statistic, degrees_of_freedom),
        })
    }
}

/// Two-sided tail probability of Student's t distribution
///
/// `P(|T| ≥ |t|)` for `df` degrees of freedom.
pub fn student_t_two_sided_p(t: f64, df: f64) -> f64 {
    if t.is_nan() || df.is_nan() || df <= 0.0 {
        return f64::NAN;
    }
    if t.is_infinite() {
        return 0.0;
    }
    let x = df / (df + t * t);
    regularized_incomplete_beta(df / 2.0, 0.5, x).clamp(0.0, 1.0)
}

/// Regularized incomplete beta function `I_x(a, b)`
pub fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let ln_front = libm::lgamma(a + b) - libm::lgamma(a) - libm::lgamma(b)
        + a * libm::log(x)
        + b * libm::log(1.0 - x);
    let front = libm::exp(ln_front);

    // The continued fraction converges fastest below the mean of the
    // distribution; use the symmetry I_x(a, b) = 1 - I_{1-x}(b, a) above it.
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    let floor = |v: f64| if libm::fabs(v) < BETA_CF_FLOOR { BETA_CF_FLOOR } else { v };

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 / floor(1.0 - qab * x / qap);
    let mut h = d;

    for m in 1..=BETA_CF_MAX_ITERATIONS {
        let m = m as f64;
        let m2 = 2.0 * m;

        // Even step
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 / floor(1.0 + aa * d);
        c = floor(1.0 + aa / c);
        h *= d * c;

        // Odd step
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 / floor(1.0 + aa * d);
        c = floor(1.0 + aa / c);
        let delta = d * c;
        h *= delta;

        if libm::fabs(delta - 1.0) < BETA_CF_EPSILON {
            break;
        }
    }
    h
}
