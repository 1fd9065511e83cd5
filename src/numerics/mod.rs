//! Numerical routines shared by the demonstrations.
//!
//! Each submodule implements one family of methods:
//! - Quadrature: composite trapezoid, adaptive Simpson
//! - ODE: fixed-step explicit Euler and classical RK4
//! - Roots: bisection, Newton-Raphson
//!
//! All routines are synchronous, allocation-light, and free of shared
//! state; they may be called concurrently from independent threads.

pub mod ode;
pub mod quadrature;
pub mod roots;

pub use ode::{Acceleration, ExplicitEuler, Integrator, Phase, RungeKutta4};
pub use quadrature::{adaptive_simpson, trapezoid, AdaptiveOptions, Quadrature};
pub use roots::{bisect, newton_raphson, RootFinding, RootOptions};
