//! Definite-integral evaluation over scalar functions.
//!
//! Two methods with opposite trade-offs:
//! - Composite trapezoid: fixed resolution chosen by the caller, O(n)
//!   evaluations, error O(n⁻²).
//! - Adaptive Simpson: error-controlled interval subdivision, refines only
//!   where the integrand demands it.
//!
//! Both report their cost as the number of integrand evaluations, so
//! callers can weigh accuracy against work.
//!
//! # Example
//!
//! ```
//! use demostrar::numerics::{trapezoid, adaptive_simpson, AdaptiveOptions};
//!
//! let coarse = trapezoid(|x| x * x, 0.0, 1.0, 100).unwrap();
//! let refined = adaptive_simpson(|x| x * x, 0.0, 1.0, AdaptiveOptions::default()).unwrap();
//! assert!((coarse.value - 1.0 / 3.0).abs() < 1e-4);
//! assert!((refined.value - 1.0 / 3.0).abs() < 1e-10);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DemoError, DemoResult};

/// Options for adaptive quadrature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveOptions {
    /// Absolute tolerance on the integral estimate.
    pub tolerance: f64,
    /// Maximum subdivision depth before the routine refuses to continue.
    pub max_depth: u32,
}

impl Default for AdaptiveOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_depth: 48,
        }
    }
}

impl AdaptiveOptions {
    /// Options with a caller-chosen tolerance and the default depth cap.
    #[must_use]
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }
}

/// Result of a quadrature evaluation: the estimate plus its cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadrature {
    /// Integral estimate.
    pub value: f64,
    /// Number of integrand evaluations performed.
    pub evaluations: u64,
}

/// Reject reversed or non-finite integration bounds.
fn check_bounds(lower: f64, upper: f64) -> DemoResult<()> {
    if !lower.is_finite() || !upper.is_finite() {
        return Err(DemoError::invalid_argument(format!(
            "integration bounds must be finite (got [{lower}, {upper}])"
        )));
    }
    if lower > upper {
        return Err(DemoError::invalid_argument(format!(
            "lower bound {lower} exceeds upper bound {upper}"
        )));
    }
    Ok(())
}

/// Composite trapezoidal rule over `subintervals` equal-width panels.
///
/// Computes `h·(½f(a) + f(a+h) + … + f(b−h) + ½f(b))` with
/// `h = (b−a)/n`. The panel count is never adjusted: accuracy is entirely
/// the caller's choice, which is the point of the method comparison.
///
/// # Errors
///
/// Returns [`DemoError::InvalidArgument`] when `subintervals` is zero, a
/// bound is non-finite, or `lower > upper`; [`DemoError::NonFinite`] when
/// the accumulated sum is NaN or infinite.
pub fn trapezoid<F>(f: F, lower: f64, upper: f64, subintervals: usize) -> DemoResult<Quadrature>
where
    F: Fn(f64) -> f64,
{
    if subintervals == 0 {
        return Err(DemoError::invalid_argument(
            "subinterval count must be at least 1",
        ));
    }
    check_bounds(lower, upper)?;

    let h = (upper - lower) / subintervals as f64;
    let mut sum = 0.5 * (f(lower) + f(upper));
    for i in 1..subintervals {
        sum += f(lower + i as f64 * h);
    }

    let value = sum * h;
    if !value.is_finite() {
        return Err(DemoError::non_finite("trapezoid sum"));
    }

    Ok(Quadrature {
        value,
        evaluations: subintervals as u64 + 1,
    })
}

/// Basic Simpson estimate over one panel from pre-computed ordinates.
fn simpson_panel(fa: f64, fm: f64, fb: f64, width: f64) -> f64 {
    width / 6.0 * (fa + 4.0 * fm + fb)
}

/// Adaptive Simpson quadrature with error-controlled subdivision.
///
/// Each interval is split in half and accepted once the Richardson
/// estimate `|S_left + S_right − S_whole| / 15` falls below the local
/// tolerance share; otherwise both halves recurse with half the budget.
/// Smooth regions terminate early, so cost concentrates where the
/// integrand actually varies.
///
/// # Errors
///
/// Returns [`DemoError::InvalidArgument`] for a non-positive or non-finite
/// tolerance, non-finite bounds, or `lower > upper`;
/// [`DemoError::NoConvergence`] when an interval still fails the
/// acceptance test at the maximum subdivision depth;
/// [`DemoError::NonFinite`] when the estimate degenerates to NaN or Inf.
pub fn adaptive_simpson<F>(
    f: F,
    lower: f64,
    upper: f64,
    options: AdaptiveOptions,
) -> DemoResult<Quadrature>
where
    F: Fn(f64) -> f64,
{
    if !options.tolerance.is_finite() || options.tolerance <= 0.0 {
        return Err(DemoError::invalid_argument(
            "adaptive tolerance must be positive and finite",
        ));
    }
    check_bounds(lower, upper)?;

    if (upper - lower).abs() < f64::EPSILON {
        return Ok(Quadrature {
            value: 0.0,
            evaluations: 0,
        });
    }

    let mid = 0.5 * (lower + upper);
    let fa = f(lower);
    let fm = f(mid);
    let fb = f(upper);
    let mut evaluations: u64 = 3;

    let whole = simpson_panel(fa, fm, fb, upper - lower);
    let value = refine(
        &f,
        lower,
        upper,
        fa,
        fm,
        fb,
        whole,
        options.tolerance,
        options.max_depth,
        &mut evaluations,
    )?;

    if !value.is_finite() {
        return Err(DemoError::non_finite("adaptive Simpson estimate"));
    }

    Ok(Quadrature { value, evaluations })
}

/// Recursive half of [`adaptive_simpson`]. `whole` is the Simpson estimate
/// over `[a, b]` from the ordinates already in hand.
#[allow(clippy::too_many_arguments)]
fn refine<F>(
    f: &F,
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
    tolerance: f64,
    depth: u32,
    evaluations: &mut u64,
) -> DemoResult<f64>
where
    F: Fn(f64) -> f64,
{
    let mid = 0.5 * (a + b);
    let left_mid = 0.5 * (a + mid);
    let right_mid = 0.5 * (mid + b);

    let flm = f(left_mid);
    let frm = f(right_mid);
    *evaluations += 2;

    let left = simpson_panel(fa, flm, fm, mid - a);
    let right = simpson_panel(fm, frm, fb, b - mid);
    let delta = left + right - whole;

    if delta.abs() <= 15.0 * tolerance {
        // Accept with the Richardson correction folded in.
        return Ok(left + right + delta / 15.0);
    }

    if depth == 0 {
        return Err(DemoError::NoConvergence {
            iterations: 0,
            residual: delta.abs() / 15.0,
        });
    }

    let half_tol = 0.5 * tolerance;
    let left_value = refine(
        f,
        a,
        mid,
        fa,
        flm,
        fm,
        left,
        half_tol,
        depth - 1,
        evaluations,
    )?;
    let right_value = refine(
        f,
        mid,
        b,
        fm,
        frm,
        fb,
        right,
        half_tol,
        depth - 1,
        evaluations,
    )?;

    Ok(left_value + right_value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_trapezoid_constant() {
        let q = trapezoid(|_| 1.0, 0.0, 1.0, 1).unwrap();
        assert!((q.value - 1.0).abs() < f64::EPSILON);
        assert_eq!(q.evaluations, 2);
    }

    #[test]
    fn test_trapezoid_exact_for_linear() {
        // The rule integrates affine functions exactly at any resolution.
        for n in [1, 2, 7, 100] {
            let q = trapezoid(|x| 3.0 * x - 2.0, 0.0, 4.0, n).unwrap();
            assert!((q.value - 16.0).abs() < 1e-12, "n = {n}: {}", q.value);
        }
    }

    #[test]
    fn test_trapezoid_quadratic_convergence() {
        // For f(x) = x² on [0, 1] the composite error is exactly 1/(6n²),
        // so doubling n divides the error by 4.
        let exact = 1.0 / 3.0;
        let e10 = (trapezoid(|x| x * x, 0.0, 1.0, 10).unwrap().value - exact).abs();
        let e20 = (trapezoid(|x| x * x, 0.0, 1.0, 20).unwrap().value - exact).abs();
        let ratio = e10 / e20;
        assert!((ratio - 4.0).abs() < 0.01, "ratio = {ratio}");
    }

    #[test]
    fn test_trapezoid_evaluation_count() {
        let q = trapezoid(|x| x, 0.0, 1.0, 1000).unwrap();
        assert_eq!(q.evaluations, 1001);
    }

    #[test]
    fn test_trapezoid_rejects_zero_subintervals() {
        let err = trapezoid(|x| x, 0.0, 1.0, 0).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_trapezoid_rejects_reversed_bounds() {
        let err = trapezoid(|x| x, 1.0, 0.0, 10).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_trapezoid_rejects_non_finite_bounds() {
        let err = trapezoid(|x| x, 0.0, f64::INFINITY, 10).unwrap_err();
        assert!(err.is_invalid_argument());

        let err = trapezoid(|x| x, f64::NAN, 1.0, 10).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_trapezoid_zero_width_interval() {
        let q = trapezoid(|x| x * x, 2.0, 2.0, 5).unwrap();
        assert!(q.value.abs() < f64::EPSILON);
    }

    #[test]
    fn test_trapezoid_detects_non_finite_sum() {
        let err = trapezoid(|_| f64::NAN, 0.0, 1.0, 4).unwrap_err();
        assert!(matches!(err, DemoError::NonFinite { .. }));
    }

    #[test]
    fn test_adaptive_simpson_sine() {
        let q = adaptive_simpson(f64::sin, 0.0, std::f64::consts::PI, AdaptiveOptions::default())
            .unwrap();
        assert!((q.value - 2.0).abs() < 1e-9, "value = {}", q.value);
        assert!(q.evaluations >= 3);
    }

    #[test]
    fn test_adaptive_simpson_exact_for_cubic() {
        // Simpson's rule is exact for cubics, so the first estimate passes.
        let q = adaptive_simpson(
            |x| x * x * x,
            0.0,
            2.0,
            AdaptiveOptions::with_tolerance(1e-8),
        )
        .unwrap();
        assert!((q.value - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_adaptive_simpson_exponential() {
        let q = adaptive_simpson(f64::exp, 0.0, 1.0, AdaptiveOptions::default()).unwrap();
        let exact = std::f64::consts::E - 1.0;
        assert!((q.value - exact).abs() < 1e-9);
    }

    #[test]
    fn test_adaptive_simpson_zero_width() {
        let q = adaptive_simpson(|x| x, 3.0, 3.0, AdaptiveOptions::default()).unwrap();
        assert!(q.value.abs() < f64::EPSILON);
        assert_eq!(q.evaluations, 0);
    }

    #[test]
    fn test_adaptive_simpson_rejects_bad_tolerance() {
        let err = adaptive_simpson(|x| x, 0.0, 1.0, AdaptiveOptions::with_tolerance(0.0));
        assert!(err.unwrap_err().is_invalid_argument());

        let err = adaptive_simpson(|x| x, 0.0, 1.0, AdaptiveOptions::with_tolerance(-1e-6));
        assert!(err.unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_adaptive_simpson_rejects_reversed_bounds() {
        let err = adaptive_simpson(|x| x, 2.0, 1.0, AdaptiveOptions::default()).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_adaptive_simpson_depth_exhaustion() {
        // A kink the acceptance test cannot smooth over at depth 0.
        let options = AdaptiveOptions {
            tolerance: 1e-14,
            max_depth: 0,
        };
        let err = adaptive_simpson(|x| x.abs().sqrt(), -1.0, 1.0, options).unwrap_err();
        assert!(matches!(err, DemoError::NoConvergence { .. }));
    }

    #[test]
    fn test_adaptive_cheaper_than_fine_trapezoid() {
        // Smooth integrand: adaptive reaches 1e-10 with far fewer
        // evaluations than a trapezoid resolution of comparable accuracy.
        let adaptive = adaptive_simpson(f64::sin, 0.0, 1.0, AdaptiveOptions::default()).unwrap();
        let fixed = trapezoid(f64::sin, 0.0, 1.0, 100_000).unwrap();
        let exact = 1.0 - 1.0_f64.cos();
        assert!((adaptive.value - exact).abs() < 1e-9);
        assert!((fixed.value - exact).abs() < 1e-9);
        assert!(adaptive.evaluations < fixed.evaluations / 100);
    }

    #[test]
    fn test_quadrature_serialization_roundtrip() {
        let q = Quadrature {
            value: 0.5,
            evaluations: 17,
        };
        let json = serde_json::to_string(&q).unwrap();
        let back: Quadrature = serde_json::from_str(&json).unwrap();
        assert_eq!(q, back);
    }

    #[test]
    fn test_adaptive_options_clone_debug() {
        let options = AdaptiveOptions::default();
        let cloned = options;
        assert!((cloned.tolerance - 1e-10).abs() < f64::EPSILON);
        let debug = format!("{options:?}");
        assert!(debug.contains("AdaptiveOptions"));
    }
}
