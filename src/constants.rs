//! Physical constants used by the demonstrations.
//!
//! Values follow the 2019 SI redefinition, where `h`, `c`, and `k_B` are
//! exact by definition. Every quantity in this crate is a plain `f64` with
//! its unit documented at the declaration site.

/// Planck constant (J·s). Exact.
pub const PLANCK: f64 = 6.626_070_15e-34;

/// Speed of light in vacuum (m/s). Exact.
pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e8;

/// Boltzmann constant (J/K). Exact.
pub const BOLTZMANN: f64 = 1.380_649e-23;

/// Wien displacement constant (m·K), literature value used as a
/// cross-check against the computed `h·c / (k_B·x)`.
pub const WIEN_DISPLACEMENT_LITERATURE: f64 = 2.897_772_9e-3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planck_constant() {
        assert!((PLANCK - 6.626_070_15e-34).abs() < 1e-42);
    }

    #[test]
    fn test_speed_of_light() {
        assert!((SPEED_OF_LIGHT - 299_792_458.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boltzmann_constant() {
        assert!((BOLTZMANN - 1.380_649e-23).abs() < 1e-30);
    }

    #[test]
    fn test_wien_literature_value_magnitude() {
        // hc/k_B ~ 1.4388e-2 m·K; dividing by the Wien root ~4.965 lands
        // within a percent of the literature constant.
        let hc_over_k = PLANCK * SPEED_OF_LIGHT / BOLTZMANN;
        let approx = hc_over_k / 4.965;
        let rel = (approx - WIEN_DISPLACEMENT_LITERATURE).abs() / WIEN_DISPLACEMENT_LITERATURE;
        assert!(rel < 1e-2);
    }
}
