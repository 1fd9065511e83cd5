//! Fixed-step integrators for one-dimensional second-order systems.
//!
//! The demonstrations compare a deliberately crude method against an
//! accurate one on the same system:
//! - Explicit Euler (1st order): energy drifts, visibly wrong over time
//! - Classical RK4 (4th order): tracks the closed form to high accuracy
//!
//! Systems provide acceleration through the [`Acceleration`] trait; each
//! step maps a phase point to the next, with a finiteness check so a
//! blown-up trajectory surfaces as an error instead of NaN positions.

use serde::{Deserialize, Serialize};

use crate::error::{DemoError, DemoResult};

/// System dynamics: acceleration as a function of phase and time.
pub trait Acceleration {
    /// Compute acceleration at position `x`, velocity `v`, time `t`.
    fn acceleration(&self, x: f64, v: f64, t: f64) -> f64;
}

/// One point in phase space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Position (m).
    pub position: f64,
    /// Velocity (m/s).
    pub velocity: f64,
}

impl Phase {
    /// Create a phase point.
    #[must_use]
    pub const fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }

    /// Check both components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Fixed-step integrator for a second-order scalar system.
pub trait Integrator {
    /// Advance one step of size `dt` from `phase` at time `t`.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::NonFinite`] when the step produces a NaN or
    /// infinite component.
    fn step(&self, system: &dyn Acceleration, phase: Phase, t: f64, dt: f64) -> DemoResult<Phase>;

    /// Global error order of the method.
    fn error_order(&self) -> u32;

    /// Human-readable method name for reports.
    fn label(&self) -> &'static str;
}

fn checked(phase: Phase, label: &str) -> DemoResult<Phase> {
    if phase.is_finite() {
        Ok(phase)
    } else {
        Err(DemoError::non_finite(format!("{label} step")))
    }
}

/// Explicit (forward) Euler integrator.
///
/// Both updates use the values at the start of the step:
/// ```text
/// v_{n+1} = v_n + a(x_n, v_n, t_n) * dt
/// x_{n+1} = x_n + v_n * dt
/// ```
/// First order, not symplectic; on oscillatory systems the amplitude grows
/// every period. That failure is what the spring demonstration shows.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl ExplicitEuler {
    /// Create a new Euler integrator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Integrator for ExplicitEuler {
    fn step(&self, system: &dyn Acceleration, phase: Phase, t: f64, dt: f64) -> DemoResult<Phase> {
        let a = system.acceleration(phase.position, phase.velocity, t);
        let next = Phase {
            position: phase.position + phase.velocity * dt,
            velocity: phase.velocity + a * dt,
        };
        checked(next, self.label())
    }

    fn error_order(&self) -> u32 {
        1
    }

    fn label(&self) -> &'static str {
        "explicit Euler"
    }
}

/// Classical fourth-order Runge-Kutta integrator.
///
/// Four acceleration evaluations per step:
/// ```text
/// k1 = f(t_n,        y_n)
/// k2 = f(t_n + h/2,  y_n + h/2 * k1)
/// k3 = f(t_n + h/2,  y_n + h/2 * k2)
/// k4 = f(t_n + h,    y_n + h   * k3)
/// y_{n+1} = y_n + h/6 * (k1 + 2*k2 + 2*k3 + k4)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKutta4;

impl RungeKutta4 {
    /// Create a new RK4 integrator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Integrator for RungeKutta4 {
    fn step(&self, system: &dyn Acceleration, phase: Phase, t: f64, dt: f64) -> DemoResult<Phase> {
        let half = 0.5 * dt;
        let Phase {
            position: x,
            velocity: v,
        } = phase;

        let k1x = v;
        let k1v = system.acceleration(x, v, t);

        let k2x = v + half * k1v;
        let k2v = system.acceleration(x + half * k1x, v + half * k1v, t + half);

        let k3x = v + half * k2v;
        let k3v = system.acceleration(x + half * k2x, v + half * k2v, t + half);

        let k4x = v + dt * k3v;
        let k4v = system.acceleration(x + dt * k3x, v + dt * k3v, t + dt);

        let sixth = dt / 6.0;
        let next = Phase {
            position: x + sixth * (k1x + 2.0 * k2x + 2.0 * k3x + k4x),
            velocity: v + sixth * (k1v + 2.0 * k2v + 2.0 * k3v + k4v),
        };
        checked(next, self.label())
    }

    fn error_order(&self) -> u32 {
        4
    }

    fn label(&self) -> &'static str {
        "Runge-Kutta 4"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    /// Unit harmonic oscillator: a = -x (k/m = 1, period 2π).
    struct UnitSpring;

    impl Acceleration for UnitSpring {
        fn acceleration(&self, x: f64, _v: f64, _t: f64) -> f64 {
            -x
        }
    }

    struct FreeParticle;

    impl Acceleration for FreeParticle {
        fn acceleration(&self, _x: f64, _v: f64, _t: f64) -> f64 {
            0.0
        }
    }

    fn run(
        integrator: &dyn Integrator,
        system: &dyn Acceleration,
        mut phase: Phase,
        dt: f64,
        steps: usize,
    ) -> Phase {
        for i in 0..steps {
            phase = integrator.step(system, phase, i as f64 * dt, dt).unwrap();
        }
        phase
    }

    #[test]
    fn test_free_particle_constant_velocity() {
        let start = Phase::new(0.0, 2.0);
        for integrator in [&ExplicitEuler::new() as &dyn Integrator, &RungeKutta4::new()] {
            let end = run(integrator, &FreeParticle, start, 0.1, 100);
            assert!((end.position - 20.0).abs() < 1e-9, "{}", integrator.label());
            assert!((end.velocity - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rk4_tracks_cosine() {
        // x(0) = 1, v(0) = 0 on the unit spring gives x(t) = cos(t).
        let dt = 0.01;
        let steps = 1000;
        let end = run(&RungeKutta4::new(), &UnitSpring, Phase::new(1.0, 0.0), dt, steps);
        let t = dt * steps as f64;
        assert!((end.position - t.cos()).abs() < 1e-8);
        assert!((end.velocity + t.sin()).abs() < 1e-8);
    }

    #[test]
    fn test_euler_amplitude_grows() {
        // Explicit Euler gains energy on the oscillator every step.
        let dt = 0.01;
        let start = Phase::new(1.0, 0.0);
        let end = run(&ExplicitEuler::new(), &UnitSpring, start, dt, 10_000);
        let energy = |p: Phase| 0.5 * (p.velocity * p.velocity + p.position * p.position);
        assert!(energy(end) > 1.2 * energy(start));
    }

    #[test]
    fn test_rk4_more_accurate_than_euler() {
        let dt = 0.01;
        let steps = 628; // about one period
        let t = dt * steps as f64;
        let start = Phase::new(1.0, 0.0);

        let euler = run(&ExplicitEuler::new(), &UnitSpring, start, dt, steps);
        let rk4 = run(&RungeKutta4::new(), &UnitSpring, start, dt, steps);

        let euler_error = (euler.position - t.cos()).abs();
        let rk4_error = (rk4.position - t.cos()).abs();
        assert!(
            rk4_error < euler_error / 100.0,
            "euler {euler_error}, rk4 {rk4_error}"
        );
    }

    #[test]
    fn test_error_orders_and_labels() {
        let euler = ExplicitEuler::new();
        assert_eq!(euler.error_order(), 1);
        assert_eq!(euler.label(), "explicit Euler");

        let rk4 = RungeKutta4::new();
        assert_eq!(rk4.error_order(), 4);
        assert_eq!(rk4.label(), "Runge-Kutta 4");
    }

    #[test]
    fn test_non_finite_step_detected() {
        struct Blowup;
        impl Acceleration for Blowup {
            fn acceleration(&self, _x: f64, _v: f64, _t: f64) -> f64 {
                f64::NAN
            }
        }

        let err = ExplicitEuler::new()
            .step(&Blowup, Phase::new(0.0, 0.0), 0.0, 0.1)
            .unwrap_err();
        assert!(matches!(err, DemoError::NonFinite { .. }));
    }

    #[test]
    fn test_phase_is_finite() {
        assert!(Phase::new(1.0, -2.0).is_finite());
        assert!(!Phase::new(f64::NAN, 0.0).is_finite());
        assert!(!Phase::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_phase_serialization_roundtrip() {
        let phase = Phase::new(0.25, -1.5);
        let json = serde_json::to_string(&phase).unwrap();
        let back: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(phase, back);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    struct UnitSpring;

    impl Acceleration for UnitSpring {
        fn acceleration(&self, x: f64, _v: f64, _t: f64) -> f64 {
            -x
        }
    }

    proptest! {
        /// RK4 stays close to the closed-form oscillator for any start.
        #[test]
        fn prop_rk4_matches_closed_form(
            x0 in -5.0f64..5.0,
            v0 in -5.0f64..5.0,
        ) {
            let dt = 0.01;
            let steps = 200;
            let mut phase = Phase::new(x0, v0);
            for i in 0..steps {
                phase = RungeKutta4::new()
                    .step(&UnitSpring, phase, f64::from(i) * dt, dt)
                    .unwrap();
            }
            let t = dt * f64::from(steps);
            let exact = x0 * t.cos() + v0 * t.sin();
            prop_assert!((phase.position - exact).abs() < 1e-6);
        }

        /// A step of size zero is the identity for both methods.
        #[test]
        fn prop_zero_step_is_identity(
            x0 in -100.0f64..100.0,
            v0 in -100.0f64..100.0,
        ) {
            let start = Phase::new(x0, v0);
            let euler = ExplicitEuler::new().step(&UnitSpring, start, 0.0, 0.0).unwrap();
            let rk4 = RungeKutta4::new().step(&UnitSpring, start, 0.0, 0.0).unwrap();
            prop_assert_eq!(euler, start);
            prop_assert_eq!(rk4, start);
        }
    }
}
