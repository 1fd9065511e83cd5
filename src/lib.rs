//! # demostrar
//!
//! Deterministic physics demonstrations with verified numerical methods.
//!
//! Six self-contained demonstrations, each pairing a closed-form physical
//! law with the numerical method that reproduces it:
//! - Maxwell speed-distribution fractions (adaptive quadrature vs the
//!   composite trapezoid rule)
//! - Spring-mass oscillation (explicit Euler vs RK4 vs the closed form)
//! - Wien's displacement law (Newton-Raphson root finding)
//! - Beat-frequency superposition
//! - Newton's-rings interference intensity
//! - Standing-wave frame rendering
//!
//! All computation is pure and synchronous; scenarios produce data series
//! for a caller-owned sink and never render anything themselves.
//!
//! ## Example
//!
//! ```rust
//! use demostrar::prelude::*;
//!
//! let gas = MaxwellSpeedDistribution::new(1578.0).unwrap();
//! let fraction = gas.fraction_between(0.0, 1578.0).unwrap();
//! assert!((fraction.percent - 42.76).abs() < 0.05);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // Numerical code choices are intentional
    clippy::imprecise_flops,   // Numerical code choices are intentional
    clippy::too_many_lines,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Sometimes range loops are clearer
    clippy::manual_midpoint,       // Manual midpoint is intentional in numerical code
)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod numerics;
pub mod scenarios;
pub mod visualization;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{DemoConfig, DemoConfigBuilder};
    pub use crate::error::{DemoError, DemoResult};
    pub use crate::numerics::{
        adaptive_simpson, bisect, newton_raphson, trapezoid, AdaptiveOptions, ExplicitEuler,
        Integrator, Phase, RootOptions, RungeKutta4,
    };
    pub use crate::scenarios::{
        BeatsScenario, Demonstration, MaxwellScenario, MaxwellSpeedDistribution, RingsScenario,
        SpringScenario, StandingWaveScenario, VerificationStatus, WienScenario,
    };
    pub use crate::visualization::{PlotSink, PlotSpec, Series};
}
