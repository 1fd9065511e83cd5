//! Scalar root finding.
//!
//! Two classics with complementary guarantees:
//! - Bisection: needs a sign change, converges unconditionally, one bit
//!   of the root per iteration.
//! - Newton-Raphson: needs the derivative, converges quadratically near a
//!   simple root, fails loudly when the derivative vanishes or the
//!   iteration budget runs out.

use serde::{Deserialize, Serialize};

use crate::error::{DemoError, DemoResult};

/// Options for iterative root finding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootOptions {
    /// Convergence tolerance on the residual `|f(x)|` (Newton) or the
    /// bracket half-width (bisection).
    pub tolerance: f64,
    /// Maximum number of iterations before giving up.
    pub max_iterations: u32,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_iterations: 100,
        }
    }
}

/// A located root together with how hard it was to find.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootFinding {
    /// Abscissa of the root.
    pub root: f64,
    /// Residual `|f(root)|` at the returned abscissa.
    pub residual: f64,
    /// Iterations performed.
    pub iterations: u32,
}

/// Bisection on a bracketing interval.
///
/// # Errors
///
/// Returns [`DemoError::InvalidArgument`] for non-finite or reversed
/// bounds or a non-positive tolerance, [`DemoError::NoBracket`] when
/// `f(lower)` and `f(upper)` share a sign, and [`DemoError::NoConvergence`]
/// when the bracket is still wider than the tolerance after the iteration
/// budget.
pub fn bisect<F>(f: F, lower: f64, upper: f64, options: RootOptions) -> DemoResult<RootFinding>
where
    F: Fn(f64) -> f64,
{
    check_options(options)?;
    if !lower.is_finite() || !upper.is_finite() || lower >= upper {
        return Err(DemoError::invalid_argument(format!(
            "bracket must be finite with lower < upper (got [{lower}, {upper}])"
        )));
    }

    let f_lower = f(lower);
    let f_upper = f(upper);
    if f_lower == 0.0 {
        return Ok(RootFinding {
            root: lower,
            residual: 0.0,
            iterations: 0,
        });
    }
    if f_upper == 0.0 {
        return Ok(RootFinding {
            root: upper,
            residual: 0.0,
            iterations: 0,
        });
    }
    if f_lower.signum() == f_upper.signum() {
        return Err(DemoError::NoBracket { lower, upper });
    }

    let (mut a, mut b) = (lower, upper);
    let mut f_a = f_lower;
    for iteration in 1..=options.max_iterations {
        let mid = 0.5 * (a + b);
        let f_mid = f(mid);

        if f_mid == 0.0 || 0.5 * (b - a) < options.tolerance {
            return Ok(RootFinding {
                root: mid,
                residual: f_mid.abs(),
                iterations: iteration,
            });
        }

        if f_a.signum() == f_mid.signum() {
            a = mid;
            f_a = f_mid;
        } else {
            b = mid;
        }
    }

    Err(DemoError::NoConvergence {
        iterations: options.max_iterations,
        residual: f(0.5 * (a + b)).abs(),
    })
}

/// Newton-Raphson iteration from an initial guess.
///
/// # Errors
///
/// Returns [`DemoError::InvalidArgument`] for a non-finite guess or
/// non-positive tolerance, [`DemoError::VanishingDerivative`] when a step
/// would divide by a numerically zero derivative,
/// [`DemoError::NonFinite`] when an iterate escapes to NaN or infinity,
/// and [`DemoError::NoConvergence`] on an exhausted iteration budget.
pub fn newton_raphson<F, D>(
    f: F,
    dfdx: D,
    initial_guess: f64,
    options: RootOptions,
) -> DemoResult<RootFinding>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    check_options(options)?;
    if !initial_guess.is_finite() {
        return Err(DemoError::invalid_argument(
            "initial guess must be finite",
        ));
    }

    let mut x = initial_guess;
    for iteration in 0..options.max_iterations {
        let residual = f(x);
        if residual.abs() < options.tolerance {
            return Ok(RootFinding {
                root: x,
                residual: residual.abs(),
                iterations: iteration,
            });
        }

        let slope = dfdx(x);
        if slope.abs() < f64::EPSILON {
            return Err(DemoError::VanishingDerivative { x });
        }

        x -= residual / slope;
        if !x.is_finite() {
            return Err(DemoError::non_finite("Newton iterate"));
        }
    }

    Err(DemoError::NoConvergence {
        iterations: options.max_iterations,
        residual: f(x).abs(),
    })
}

fn check_options(options: RootOptions) -> DemoResult<()> {
    if !options.tolerance.is_finite() || options.tolerance <= 0.0 {
        return Err(DemoError::invalid_argument(
            "root-finding tolerance must be positive and finite",
        ));
    }
    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Bisection finds the root of a shifted line anywhere in the
        /// bracket interior.
        #[test]
        fn prop_bisect_linear(
            shift in -0.9f64..0.9,
        ) {
            let found = bisect(|x| x - shift, -1.0, 1.0, RootOptions::default()).unwrap();
            prop_assert!((found.root - shift).abs() < 1e-10);
        }

        /// Newton agrees with bisection on cubics with one real root.
        #[test]
        fn prop_newton_agrees_with_bisect(
            magnitude in 0.5f64..2.0,
            negate in proptest::bool::ANY,
        ) {
            let shift = if negate { -magnitude } else { magnitude };
            let f = |x: f64| x * x * x - shift;
            let newton = newton_raphson(
                f,
                |x| 3.0 * x * x,
                2.5,
                RootOptions::default(),
            ).unwrap();
            let bisected = bisect(f, -3.0, 3.0, RootOptions::default()).unwrap();
            prop_assert!((newton.root - bisected.root).abs() < 1e-8);
        }
    }
}
