//! Physics demonstrations.
//!
//! Each demonstration pairs a validated configuration with a pure
//! computation and a set of named verification criteria checked against
//! closed-form physics:
//!
//! 1. [`maxwell`] - Definite-integral evaluation of the Maxwell speed
//!    distribution (adaptive vs trapezoid)
//! 2. [`spring`] - Spring-block ODE: explicit Euler vs RK4 vs closed form
//! 3. [`wien`] - Wien displacement law by Newton-Raphson root finding
//! 4. [`beats`] - Two-tone superposition and beat frequency
//! 5. [`rings`] - Newton's rings interference intensity
//! 6. [`standing_wave`] - Standing wave rendered frame by frame
//!
//! Demonstrations are one-shot: `execute()` runs the computation, checks
//! every criterion, and returns a [`VerificationStatus`]. They hold no
//! mutable state and produce data series for a caller-owned sink; nothing
//! here draws or animates.

pub mod beats;
pub mod maxwell;
pub mod rings;
pub mod spring;
pub mod standing_wave;
pub mod wien;

pub use beats::{BeatsConfig, BeatsScenario};
pub use maxwell::{
    ComparisonRow, FractionEstimate, MaxwellConfig, MaxwellScenario, MaxwellSpeedDistribution,
    MethodComparison, QuadratureMethod,
};
pub use rings::{RingsConfig, RingsScenario};
pub use spring::{SpringConfig, SpringScenario, SpringTrajectory};
pub use standing_wave::{StandingWaveConfig, StandingWaveScenario, WaveFrame};
pub use wien::{WienConfig, WienScenario};

use serde::{Deserialize, Serialize};

use crate::error::DemoResult;

/// Serde default: scenarios are enabled unless a config turns them off.
pub(crate) const fn default_enabled() -> bool {
    true
}

/// Common trait for all demonstrations.
pub trait Demonstration {
    /// Demonstration name for display.
    fn name(&self) -> &'static str;

    /// Physics topic path, e.g. `"statistical/maxwell_speed_distribution"`.
    fn topic(&self) -> &'static str;

    /// Run the computation and verify every criterion.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying computation fails; a criterion
    /// that merely fails its threshold is reported in the status, not as
    /// an error.
    fn execute(&self) -> DemoResult<VerificationStatus>;
}

/// Outcome of a demonstration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationStatus {
    /// Whether every criterion passed.
    pub verified: bool,
    /// Individual criteria and their measured values.
    pub criteria: Vec<CriterionStatus>,
    /// Overall message.
    pub message: String,
}

impl VerificationStatus {
    /// Build a status from criteria; `verified` is the conjunction.
    #[must_use]
    pub fn from_criteria(criteria: Vec<CriterionStatus>, message: impl Into<String>) -> Self {
        let verified = criteria.iter().all(|c| c.passed);
        Self {
            verified,
            criteria,
            message: message.into(),
        }
    }
}

/// Status of a single verification criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionStatus {
    /// Criterion ID (e.g., "MX-NORM").
    pub id: String,
    /// Criterion name.
    pub name: String,
    /// Whether it passed.
    pub passed: bool,
    /// Measured value.
    pub value: f64,
    /// Threshold for passing.
    pub threshold: f64,
}

impl CriterionStatus {
    /// Criterion that passes when `value` is within `threshold` of
    /// `expected` in absolute terms.
    #[must_use]
    pub fn within(
        id: impl Into<String>,
        name: impl Into<String>,
        value: f64,
        expected: f64,
        threshold: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            passed: (value - expected).abs() <= threshold,
            value,
            threshold,
        }
    }

    /// Criterion that passes when `value` does not exceed `threshold`.
    #[must_use]
    pub fn below(id: impl Into<String>, name: impl Into<String>, value: f64, threshold: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            passed: value <= threshold,
            value,
            threshold,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_status_from_criteria() {
        let status = VerificationStatus::from_criteria(
            vec![
                CriterionStatus::within("T-1", "close", 1.0, 1.0, 1e-9),
                CriterionStatus::below("T-2", "small", 0.5, 1.0),
            ],
            "all good",
        );
        assert!(status.verified);
        assert_eq!(status.criteria.len(), 2);
    }

    #[test]
    fn test_verification_status_any_failure_unverifies() {
        let status = VerificationStatus::from_criteria(
            vec![
                CriterionStatus::within("T-1", "close", 1.0, 1.0, 1e-9),
                CriterionStatus::below("T-2", "too big", 2.0, 1.0),
            ],
            "one failed",
        );
        assert!(!status.verified);
    }

    #[test]
    fn test_criterion_within() {
        let criterion = CriterionStatus::within("T-3", "near", 42.76, 42.8, 0.1);
        assert!(criterion.passed);

        let criterion = CriterionStatus::within("T-3", "far", 42.76, 50.0, 0.1);
        assert!(!criterion.passed);
    }

    #[test]
    fn test_criterion_below_boundary() {
        let criterion = CriterionStatus::below("T-4", "at threshold", 1.0, 1.0);
        assert!(criterion.passed);
    }

    #[test]
    fn test_verification_status_serialization() {
        let status = VerificationStatus::from_criteria(
            vec![CriterionStatus::below("MX-NORM", "normalization", 1e-6, 1e-4)],
            "normalized",
        );

        let json = serde_json::to_string(&status).expect("serialize");
        assert!(json.contains("MX-NORM"));

        let back: VerificationStatus = serde_json::from_str(&json).expect("deserialize");
        assert!(back.verified);
    }
}
