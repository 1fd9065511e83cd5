//! Error types for demostrar.
//!
//! Every fallible operation returns `Result<T, DemoError>` instead of
//! panicking. Numerical degeneracies (a reference value of zero, a NaN in a
//! computed quantity) are reported as typed errors so the caller decides
//! severity; the library never retries and never aborts the process.

use thiserror::Error;

/// Result type alias for demostrar operations.
pub type DemoResult<T> = Result<T, DemoError>;

/// Unified error type for all demostrar operations.
///
/// # Design
///
/// Errors fall into three groups:
/// 1. Caller mistakes (`InvalidArgument`) — reject before computing.
/// 2. Numerical conditions (`DegenerateReference`, `NonFinite`, root-finding
///    failures) — detected during computation, never swallowed.
/// 3. Ambient failures (configuration, I/O, serialization).
#[derive(Debug, Error)]
pub enum DemoError {
    // ===== Caller Mistakes =====
    /// Invalid argument supplied by the caller.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },

    // ===== Numerical Conditions =====
    /// Relative error is undefined because the reference value is
    /// numerically zero.
    #[error("Relative error undefined: reference value {reference:.6e} is numerically zero")]
    DegenerateReference {
        /// The near-zero reference value.
        reference: f64,
    },

    /// Numerical instability detected (NaN or Inf).
    #[error("Non-finite value detected at {location}")]
    NonFinite {
        /// Location where the non-finite value was detected.
        location: String,
    },

    /// Root finding requires a sign change over the bracket.
    #[error("No sign change over [{lower:.6e}, {upper:.6e}]: root not bracketed")]
    NoBracket {
        /// Lower end of the rejected bracket.
        lower: f64,
        /// Upper end of the rejected bracket.
        upper: f64,
    },

    /// Newton iteration hit a vanishing derivative.
    #[error("Derivative vanishes at x = {x:.6e}: Newton step undefined")]
    VanishingDerivative {
        /// Abscissa where the derivative was numerically zero.
        x: f64,
    },

    /// Iteration budget exhausted before reaching tolerance.
    #[error("No convergence after {iterations} iterations (residual {residual:.6e})")]
    NoConvergence {
        /// Iterations performed before giving up.
        iterations: u32,
        /// Residual magnitude at the final iterate.
        residual: f64,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DemoError {
    /// Create an invalid-argument error with a message.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create a non-finite error naming the offending quantity.
    #[must_use]
    pub fn non_finite(location: impl Into<String>) -> Self {
        Self::NonFinite {
            location: location.into(),
        }
    }

    /// Check if this error reports a caller mistake (fix the call site).
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Check if this error arose inside a numerical routine rather than
    /// from bad input or the environment.
    #[must_use]
    pub const fn is_numerical(&self) -> bool {
        matches!(
            self,
            Self::DegenerateReference { .. }
                | Self::NonFinite { .. }
                | Self::NoBracket { .. }
                | Self::VanishingDerivative { .. }
                | Self::NoConvergence { .. }
        )
    }
}
