//! Wien's displacement law by root finding.
//!
//! # Governing Equations
//!
//! ```text
//! Wien equation:  5·e⁻ˣ + x − 5 = 0      (nontrivial root x ≈ 4.965114)
//! Constant:       b = h·c / (k_B·x)      (≈ 2.8978e−3 m·K)
//! Peak law:       T = b / λ_peak
//! ```
//!
//! Newton-Raphson from a caller-supplied initial guess is the primary
//! method; bisection on a bracketing interval is the cross-check. The
//! equation also has the trivial root x = 0, so guesses should sit near
//! the graphical intersection (4 to 6).

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{BOLTZMANN, PLANCK, SPEED_OF_LIGHT, WIEN_DISPLACEMENT_LITERATURE};
use crate::error::{DemoError, DemoResult};
use crate::numerics::{bisect, newton_raphson, RootFinding, RootOptions};
use crate::visualization::Series;

use super::{CriterionStatus, Demonstration, VerificationStatus};

/// Left side of the Wien equation, `5·e⁻ˣ + x − 5`.
#[must_use]
pub fn wien_equation(x: f64) -> f64 {
    5.0 * (-x).exp() + x - 5.0
}

/// Derivative of the Wien equation, `1 − 5·e⁻ˣ`.
#[must_use]
pub fn wien_equation_derivative(x: f64) -> f64 {
    1.0 - 5.0 * (-x).exp()
}

/// Configuration for the Wien displacement demonstration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct WienConfig {
    /// Whether this demonstration runs.
    #[serde(default = "super::default_enabled")]
    pub enabled: bool,
    /// Initial guess for Newton-Raphson; 4 to 6 targets the nontrivial
    /// root.
    #[validate(range(min = 1.0, max = 10.0))]
    #[serde(default = "default_initial_guess")]
    pub initial_guess: f64,
    /// Peak wavelength whose temperature is reported (m); the default is
    /// the solar peak at 502 nm.
    #[validate(range(min = 1e-12))]
    #[serde(default = "default_wavelength")]
    pub peak_wavelength: f64,
}

fn default_initial_guess() -> f64 {
    5.0
}

fn default_wavelength() -> f64 {
    502e-9
}

impl Default for WienConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_guess: default_initial_guess(),
            peak_wavelength: default_wavelength(),
        }
    }
}

/// Solved Wien constant with the root that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WienSolution {
    /// Root of the Wien equation.
    pub root: RootFinding,
    /// Displacement constant `b = h·c/(k_B·x)` (m·K).
    pub displacement_constant: f64,
}

/// The Wien displacement demonstration.
#[derive(Debug, Clone)]
pub struct WienScenario {
    config: WienConfig,
}

impl WienScenario {
    /// Create the demonstration from its configuration.
    #[must_use]
    pub const fn new(config: WienConfig) -> Self {
        Self { config }
    }

    /// Access the configuration.
    #[must_use]
    pub const fn config(&self) -> &WienConfig {
        &self.config
    }

    /// Solve the Wien equation by Newton-Raphson from the configured
    /// guess and derive the displacement constant.
    ///
    /// # Errors
    ///
    /// Propagates root-finding failures (vanishing derivative, exhausted
    /// iteration budget).
    pub fn solve(&self) -> DemoResult<WienSolution> {
        let root = newton_raphson(
            wien_equation,
            wien_equation_derivative,
            self.config.initial_guess,
            RootOptions::default(),
        )?;
        Ok(WienSolution {
            root,
            displacement_constant: PLANCK * SPEED_OF_LIGHT / (BOLTZMANN * root.root),
        })
    }

    /// Cross-check root from bisection on `[1, 10]`, which brackets only
    /// the nontrivial root.
    ///
    /// # Errors
    ///
    /// Propagates bracketing and convergence failures.
    pub fn solve_bisection(&self) -> DemoResult<RootFinding> {
        bisect(wien_equation, 1.0, 10.0, RootOptions::default())
    }

    /// Blackbody peak temperature for a peak wavelength (K).
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::InvalidArgument`] for a non-positive or
    /// non-finite wavelength; root-finding failures propagate.
    pub fn peak_temperature(&self, wavelength: f64) -> DemoResult<f64> {
        if !wavelength.is_finite() || wavelength <= 0.0 {
            return Err(DemoError::invalid_argument(format!(
                "peak wavelength must be positive and finite (got {wavelength})"
            )));
        }
        let solution = self.solve()?;
        Ok(solution.displacement_constant / wavelength)
    }

    /// The two sides of the graphical solution, `y = 5·e⁻ˣ` and
    /// `y = 5 − x`, sampled over `[0, 10]` for a plot sink.
    #[must_use]
    pub fn equation_series(samples: usize) -> (Series, Series) {
        let samples = samples.max(2);
        let step = 10.0 / (samples - 1) as f64;
        let mut exponential = Series::new("y = 5·exp(-x)");
        let mut linear = Series::new("y = 5 - x");
        for i in 0..samples {
            let x = i as f64 * step;
            exponential.push(x, 5.0 * (-x).exp());
            linear.push(x, 5.0 - x);
        }
        (exponential, linear)
    }
}

impl Demonstration for WienScenario {
    fn name(&self) -> &'static str {
        "Wien Displacement Law"
    }

    fn topic(&self) -> &'static str {
        "thermal/wien_displacement"
    }

    fn execute(&self) -> DemoResult<VerificationStatus> {
        let solution = self.solve()?;
        let bracket = self.solve_bisection()?;
        let sun_temperature = self.peak_temperature(self.config.peak_wavelength)?;

        let criteria = vec![
            CriterionStatus::within(
                "WD-ROOT",
                "Wien equation root",
                solution.root.root,
                4.965_114,
                1e-5,
            ),
            CriterionStatus::below(
                "WD-AGREE",
                "Newton vs bisection disagreement",
                (solution.root.root - bracket.root).abs(),
                1e-8,
            ),
            CriterionStatus::within(
                "WD-CONST",
                "Displacement constant vs literature",
                solution.displacement_constant,
                WIEN_DISPLACEMENT_LITERATURE,
                1e-7,
            ),
        ];

        Ok(VerificationStatus::from_criteria(
            criteria,
            format!(
                "x = {:.6}, b = {:.6e} m·K, T({:.0} nm) = {:.0} K",
                solution.root.root,
                solution.displacement_constant,
                self.config.peak_wavelength * 1e9,
                sun_temperature
            ),
        ))
    }
}
